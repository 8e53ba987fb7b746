//! Composition of operation combinations.
//!
//! Applies one combination — an ordered index subset of the operation
//! catalog — to a private working copy of an image. The input image is never
//! mutated, so the same source can feed every combination of a run.

use thiserror::Error;

use crate::decode::SourceImage;
use crate::ops::Operation;

/// Errors surfaced per-combination by the composition layer.
///
/// Operations themselves are total over well-formed images; what can fail is
/// the handoff — a pixel buffer that doesn't match its declared dimensions,
/// or a combination indexing outside the catalog.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The image's pixel buffer doesn't match its dimensions.
    #[error("Malformed pixel buffer: expected {expected} bytes for {width}x{height}, got {actual}")]
    MalformedBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A combination references an operation index outside the catalog.
    #[error("Combination references operation {index}, but the catalog has {len} operations")]
    UnknownOperation { index: usize, len: usize },
}

/// Apply a combination's operations, left to right, to a copy of `image`.
///
/// The referenced operations are applied in the order the combination lists
/// them, which preserves the catalog's registration order. The input image
/// is unaffected.
///
/// # Errors
///
/// `TransformError::MalformedBuffer` if the image buffer is inconsistent,
/// `TransformError::UnknownOperation` if the combination indexes outside
/// `ops`. Both abort this combination only; the caller decides whether to
/// continue with others.
pub fn apply_combination(
    ops: &[Operation],
    combination: &[usize],
    image: &SourceImage,
) -> Result<SourceImage, TransformError> {
    if !image.is_well_formed() {
        return Err(TransformError::MalformedBuffer {
            width: image.width,
            height: image.height,
            expected: (image.width as usize) * (image.height as usize) * 3,
            actual: image.pixels.len(),
        });
    }

    if let Some(&index) = combination.iter().find(|&&i| i >= ops.len()) {
        return Err(TransformError::UnknownOperation {
            index,
            len: ops.len(),
        });
    }

    let mut working = image.clone();
    for &i in combination {
        working = ops[i].apply(&working);
    }
    Ok(working)
}
