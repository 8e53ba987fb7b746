//! Fixed-canvas image rotation with bilinear interpolation.
//!
//! The image is rotated about its center while the canvas keeps the source
//! dimensions: content that leaves the frame is cropped, and regions the
//! rotated content no longer covers are filled black.
//!
//! # Algorithm
//!
//! Inverse mapping: for each pixel of the output, compute which source
//! coordinate lands there and sample it with bilinear interpolation.
//! For a visually counter-clockwise rotation by θ (y axis pointing down),
//! the inverse transform of a destination offset (dx, dy) from the center is:
//!
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + cx
//! src_y = dx * sin(θ) + dy * cos(θ) + cy
//! ```

use crate::decode::SourceImage;

/// Rotate an image by `angle_degrees` counter-clockwise about its center.
///
/// The output has the same dimensions as the input. Angles are taken modulo
/// 360; rotating by 0 (or any multiple of 360) returns an identical copy,
/// and 180 degrees is an exact pixel reversal with no resampling.
pub fn rotate(image: &SourceImage, angle_degrees: f64) -> SourceImage {
    let angle = angle_degrees.rem_euclid(360.0);

    // Fast path: no rotation needed
    if angle < 0.001 || angle > 359.999 {
        return image.clone();
    }

    if image.is_empty() {
        return image.clone();
    }

    // Fast path: 180 degrees reverses the pixel sequence exactly
    if (angle - 180.0).abs() < 0.001 {
        return rotate_180(image);
    }

    let (w, h) = (image.width, image.height);

    // Pixel-center convention: exact 90/270 rotations of a square image
    // map grid points onto grid points and stay lossless.
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    let angle_rad = angle.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..h {
        for dst_x in 0..w {
            let dx = dst_x as f64 - cx;
            let dy = dst_y as f64 - cy;

            // Inverse rotation to find the contributing source coordinate
            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            let pixel = sample_bilinear(image, src_x, src_y);

            let dst_idx = ((dst_y * w + dst_x) * 3) as usize;
            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    SourceImage {
        width: w,
        height: h,
        pixels: output,
    }
}

/// Exact 180-degree rotation: the pixel sequence reversed triple by triple.
fn rotate_180(image: &SourceImage) -> SourceImage {
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for px in image.pixels.chunks_exact(3).rev() {
        pixels.extend_from_slice(px);
    }
    SourceImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &SourceImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Coordinates outside [0, w-1] x [0, h-1] sample black, which is what fills
/// the uncovered corners of the fixed canvas.
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as usize, image.height as usize);

    if x < 0.0 || y < 0.0 || x > (w - 1) as f64 || y > (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    // Bilinear interpolation formula
    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 8 % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        SourceImage {
            width,
            height,
            pixels,
        }
    }

    /// 2x2 image with four distinct corner colors.
    fn corner_image() -> SourceImage {
        SourceImage::new(
            2,
            2,
            vec![
                255, 0, 0, // A (0,0)
                0, 255, 0, // B (1,0)
                0, 0, 255, // C (0,1)
                255, 255, 0, // D (1,1)
            ],
        )
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = test_image(10, 6);
        let result = rotate(&img, 0.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_full_turn_is_identity() {
        let img = test_image(10, 6);
        assert_eq!(rotate(&img, 360.0), img);
        assert_eq!(rotate(&img, 720.0), img);
    }

    #[test]
    fn test_rotation_preserves_dimensions() {
        let img = test_image(20, 10);
        for angle in [10.0, 45.0, 90.0, 130.0, 270.0, 350.0] {
            let result = rotate(&img, angle);
            assert_eq!(
                (result.width, result.height),
                (20, 10),
                "canvas changed for angle {}",
                angle
            );
        }
    }

    #[test]
    fn test_rotate_180_reverses_pixels() {
        let img = corner_image();
        let result = rotate(&img, 180.0);

        assert_eq!(result.rgb_at(0, 0), [255, 255, 0]); // D
        assert_eq!(result.rgb_at(1, 0), [0, 0, 255]); // C
        assert_eq!(result.rgb_at(0, 1), [0, 255, 0]); // B
        assert_eq!(result.rgb_at(1, 1), [255, 0, 0]); // A
    }

    #[test]
    fn test_rotate_90_ccw_square_is_exact() {
        // Counter-clockwise: the right column becomes the top row.
        let img = corner_image();
        let result = rotate(&img, 90.0);

        assert_eq!(result.rgb_at(0, 0), [0, 255, 0]); // B
        assert_eq!(result.rgb_at(1, 0), [255, 255, 0]); // D
        assert_eq!(result.rgb_at(0, 1), [255, 0, 0]); // A
        assert_eq!(result.rgb_at(1, 1), [0, 0, 255]); // C
    }

    #[test]
    fn test_rotate_270_is_inverse_of_90() {
        let img = corner_image();
        let round_trip = rotate(&rotate(&img, 90.0), 270.0);
        assert_eq!(round_trip, img);
    }

    #[test]
    fn test_rotation_fills_corners_black() {
        // A bright image rotated 45 degrees leaves black in the corners.
        let img = SourceImage::new(20, 20, vec![255u8; 20 * 20 * 3]);
        let result = rotate(&img, 45.0);

        assert_eq!(result.rgb_at(0, 0), [0, 0, 0]);
        assert_eq!(result.rgb_at(19, 19), [0, 0, 0]);
        // Center stays bright
        assert_eq!(result.rgb_at(10, 10), [255, 255, 255]);
    }

    #[test]
    fn test_negative_angle_wraps() {
        let img = test_image(8, 8);
        assert_eq!(rotate(&img, -90.0), rotate(&img, 270.0));
    }

    #[test]
    fn test_rotation_does_not_mutate_input() {
        let img = test_image(12, 12);
        let before = img.clone();
        let _ = rotate(&img, 30.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = SourceImage::new(1, 1, vec![128, 128, 128]);
        let result = rotate(&img, 45.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = test_image(50, 1);
        let result = rotate(&img, 30.0);
        assert_eq!((result.width, result.height), (50, 1));
    }

    #[test]
    fn test_interpolation_produces_valid_buffer() {
        let img = test_image(15, 9);
        let result = rotate(&img, 37.0);
        assert!(result.is_well_formed());
    }

    #[test]
    fn test_rotation_is_deterministic() {
        let img = test_image(16, 16);
        assert_eq!(rotate(&img, 50.0), rotate(&img, 50.0));
    }
}
