use image::{DynamicImage, GrayImage, Luma};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Apply Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Inverted binary threshold: pixels at or below `threshold` become
/// foreground (255), brighter pixels become background (0).
///
/// Assumes the object is darker than a light backdrop.
pub fn binarize_inverted(img: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y)[0] > threshold {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}
