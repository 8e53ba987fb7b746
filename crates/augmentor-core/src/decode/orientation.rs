//! EXIF orientation normalization.
//!
//! Cameras record the sensor's physical rotation in the EXIF orientation tag
//! instead of rotating the pixels. Before any augmentation runs, the pixel
//! buffer is rotated upright so every downstream transform sees the image
//! the way a viewer would.
//!
//! Only the three rotation codes are corrected (3 = 180 deg, 6 = 90 deg CW,
//! 8 = 270 deg CW). A missing tag or any other code — including the mirrored
//! variants 2/4/5/7 — leaves the image unchanged; an unrecognized code is a
//! no-op, never an error.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use serde::{Deserialize, Serialize};

use super::SourceImage;

/// Pixel rotation needed to bring an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Already upright (or unrecognized metadata) — no correction.
    #[default]
    Upright,
    /// EXIF code 3: rotate 180 degrees.
    Rotate180,
    /// EXIF code 6: rotate 90 degrees clockwise.
    Rotate90Cw,
    /// EXIF code 8: rotate 270 degrees clockwise (90 CCW).
    Rotate270Cw,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Orientation::Rotate90Cw | Orientation::Rotate270Cw)
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90Cw,
            8 => Orientation::Rotate270Cw,
            _ => Orientation::Upright,
        }
    }
}

/// Read the EXIF orientation tag from raw image bytes.
///
/// Returns `Orientation::Upright` if there is no EXIF block, no orientation
/// field, or the field holds an unrecognized value.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Upright
        }
        Err(_) => Orientation::Upright,
    }
}

/// Rotate an image's pixel buffer upright.
///
/// Total over all inputs: `Upright` returns a copy, the rotation codes return
/// the rotated buffer, and a buffer that cannot be reinterpreted (malformed
/// length) is returned unchanged rather than failing — validation of buffers
/// belongs to the composition layer.
pub fn normalize(image: &SourceImage, orientation: Orientation) -> SourceImage {
    if orientation == Orientation::Upright {
        return image.clone();
    }

    let Some(rgb) = image.to_rgb_image() else {
        return image.clone();
    };

    let rotated = match orientation {
        Orientation::Upright => rgb,
        Orientation::Rotate180 => image::imageops::rotate180(&rgb),
        Orientation::Rotate90Cw => image::imageops::rotate90(&rgb),
        Orientation::Rotate270Cw => image::imageops::rotate270(&rgb),
    };

    SourceImage::from_rgb_image(rotated)
}
