//! Photometric adjustments.
//!
//! Enhancement-factor semantics: every adjustment takes a factor whose
//! neutral value is 1.0. Brightness scales toward black, contrast
//! interpolates about the image's mean luminance, and color saturation
//! interpolates about each pixel's own luminance gray. A factor of 1.0
//! returns an identical copy; factors below 1.0 move toward the degenerate
//! image (black, flat gray, grayscale), factors above 1.0 move away from it.

use crate::decode::SourceImage;

/// Luminance coefficients (ITU-R BT.601), matching the grayscale the
/// contrast and color adjustments interpolate against.
#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Scale image brightness.
///
/// Every channel is multiplied by `factor` and clamped: 0.0 yields black,
/// 1.0 the original image.
pub fn adjust_brightness(image: &SourceImage, factor: f32) -> SourceImage {
    if factor == 1.0 {
        return image.clone();
    }

    let mut pixels = image.pixels.clone();
    for chunk in pixels.chunks_exact_mut(3) {
        for channel in chunk.iter_mut() {
            *channel = (*channel as f32 * factor).clamp(0.0, 255.0).round() as u8;
        }
    }

    SourceImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Scale image contrast about the mean luminance.
///
/// The anchor is the mean luminance of the whole image: 0.0 yields a flat
/// gray image at that mean, 1.0 the original.
pub fn adjust_contrast(image: &SourceImage, factor: f32) -> SourceImage {
    if factor == 1.0 || image.is_empty() {
        return image.clone();
    }

    let mut sum = 0.0f64;
    for chunk in image.pixels.chunks_exact(3) {
        sum += luminance(chunk[0] as f32, chunk[1] as f32, chunk[2] as f32) as f64;
    }
    let mean = (sum / image.pixel_count() as f64) as f32;

    let mut pixels = image.pixels.clone();
    for chunk in pixels.chunks_exact_mut(3) {
        for channel in chunk.iter_mut() {
            let v = mean + factor * (*channel as f32 - mean);
            *channel = v.clamp(0.0, 255.0).round() as u8;
        }
    }

    SourceImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Scale color saturation about each pixel's luminance.
///
/// 0.0 yields the grayscale image, 1.0 the original; values above 1.0
/// push channels away from gray.
pub fn adjust_color(image: &SourceImage, factor: f32) -> SourceImage {
    if factor == 1.0 {
        return image.clone();
    }

    let mut pixels = image.pixels.clone();
    for chunk in pixels.chunks_exact_mut(3) {
        let gray = luminance(chunk[0] as f32, chunk[1] as f32, chunk[2] as f32);
        for channel in chunk.iter_mut() {
            let v = gray + factor * (*channel as f32 - gray);
            *channel = v.clamp(0.0, 255.0).round() as u8;
        }
    }

    SourceImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}
