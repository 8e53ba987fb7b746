//! Blur-style noise.
//!
//! The noise operation is a Gaussian blur whose sigma equals the intensity
//! parameter, so strength scales smoothly over [0, 1]. Intensity 0 is a
//! defined near-no-op: the image is returned as an identical copy.

use crate::decode::SourceImage;

/// Apply blur-style noise with the given intensity.
///
/// Intensity is the Gaussian sigma in pixels; the catalog samples it from
/// [0, 1]. Values at or below zero return an identical copy. A buffer that
/// cannot be reinterpreted (malformed length) is returned unchanged —
/// validation of buffers belongs to the composition layer.
pub fn add_noise(image: &SourceImage, intensity: f32) -> SourceImage {
    if intensity <= f32::EPSILON {
        return image.clone();
    }

    match image.to_rgb_image() {
        Some(rgb) => SourceImage::from_rgb_image(image::imageops::blur(&rgb, intensity)),
        None => image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Image with a single bright pixel in the center.
    fn impulse_image(size: u32) -> SourceImage {
        let mut pixels = vec![0u8; (size * size * 3) as usize];
        let center = size / 2;
        let idx = ((center * size + center) * 3) as usize;
        pixels[idx] = 255;
        pixels[idx + 1] = 255;
        pixels[idx + 2] = 255;
        SourceImage::new(size, size, pixels)
    }

    #[test]
    fn test_zero_intensity_is_identity() {
        let img = impulse_image(9);
        let result = add_noise(&img, 0.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_noise_spreads_energy() {
        let img = impulse_image(9);
        let result = add_noise(&img, 1.0);

        // The impulse dims and its neighbors pick up some of the energy.
        assert!(result.rgb_at(4, 4)[0] < 255);
        assert!(result.rgb_at(3, 4)[0] > 0);
        assert!(result.rgb_at(4, 3)[0] > 0);
    }

    #[test]
    fn test_noise_preserves_dimensions() {
        let img = impulse_image(7);
        let result = add_noise(&img, 0.6);
        assert_eq!((result.width, result.height), (7, 7));
        assert!(result.is_well_formed());
    }

    #[test]
    fn test_stronger_intensity_blurs_more() {
        let img = impulse_image(11);
        let soft = add_noise(&img, 0.3);
        let strong = add_noise(&img, 1.0);

        // The center survives better under the weaker kernel.
        assert!(soft.rgb_at(5, 5)[0] > strong.rgb_at(5, 5)[0]);
    }

    #[test]
    fn test_uniform_image_unchanged_by_noise() {
        // Blurring a constant image is the same constant image.
        let img = SourceImage::new(8, 8, vec![77u8; 8 * 8 * 3]);
        let result = add_noise(&img, 0.8);
        assert_eq!(result, img);
    }

    #[test]
    fn test_noise_does_not_mutate_input() {
        let img = impulse_image(9);
        let before = img.clone();
        let _ = add_noise(&img, 0.9);
        assert_eq!(img, before);
    }

    #[test]
    fn test_noise_is_deterministic() {
        let img = impulse_image(9);
        assert_eq!(add_noise(&img, 0.5), add_noise(&img, 0.5));
    }
}
