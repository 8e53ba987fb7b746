//! Image decoding for the augmentation pipeline.
//!
//! Source files are decoded into an owned RGB8 buffer ([`SourceImage`]) and
//! rotated upright against their EXIF orientation tag before any transform
//! sees them. Format detection is by content, not file extension, so a
//! mis-named file still decodes.
//!
//! # Examples
//!
//! ```ignore
//! use augmentor_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod orientation;
mod types;

use std::io::Cursor;

use image::ImageReader;

pub use orientation::{normalize, read_orientation, Orientation};
pub use types::{DecodeError, SourceImage};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    // Orientation lives in the EXIF container, which the pixel decoder
    // discards, so extract it first.
    let orientation = read_orientation(bytes);

    let image = decode_image_unoriented(bytes)?;
    Ok(normalize(&image, orientation))
}

/// Decode an image from bytes without applying EXIF orientation.
///
/// Use this when the caller handles orientation separately or the image is
/// known to be upright already.
pub fn decode_image_unoriented(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(SourceImage::from_rgb_image(img.into_rgb8()))
}
