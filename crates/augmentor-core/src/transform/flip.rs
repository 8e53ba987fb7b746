//! Horizontal mirroring.

use crate::decode::SourceImage;

/// Mirror an image left-right.
///
/// Pixel (x, y) of the output is pixel (width - 1 - x, y) of the input.
/// Dimensions are unchanged.
pub fn flip_horizontal(image: &SourceImage) -> SourceImage {
    if image.is_empty() {
        return image.clone();
    }

    let row_bytes = image.width as usize * 3;
    let mut pixels = Vec::with_capacity(image.pixels.len());

    for row in image.pixels.chunks_exact(row_bytes) {
        for px in row.chunks_exact(3).rev() {
            pixels.extend_from_slice(px);
        }
    }

    SourceImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}
