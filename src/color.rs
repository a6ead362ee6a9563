//! Representative color of the photographed object.
//!
//! The average runs over the whole frame, background included, so it works
//! best when the object fills most of the photo or sits on a neutral backdrop.

use crate::config::ColorConfig;
use crate::models::Color;
use image::DynamicImage;
use imageproc::filter::gaussian_blur_f32;
use log::debug;

#[derive(Debug, Clone)]
pub struct ColorSampler {
    config: ColorConfig,
}

impl ColorSampler {
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }

    /// Mean RGB of the lightly blurred image, truncated per channel.
    ///
    /// An image without pixels samples as black.
    pub fn sample(&self, img: &DynamicImage) -> Color {
        let rgb = img.to_rgb8();
        let pixel_count = rgb.width() as u64 * rgb.height() as u64;
        if pixel_count == 0 {
            return Color::new(0, 0, 0);
        }

        let blurred = gaussian_blur_f32(&rgb, self.config.blur_sigma);
        let mut sums = [0u64; 3];
        for pixel in blurred.pixels() {
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += channel as u64;
            }
        }

        let color = Color::new(
            (sums[0] / pixel_count) as u8,
            (sums[1] / pixel_count) as u8,
            (sums[2] / pixel_count) as u8,
        );
        debug!("Sampled color {} over {} pixels", color, pixel_count);
        color
    }
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn uniform_image_samples_its_own_color() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(37, 23, Rgb([200, 100, 50])));
        let color = ColorSampler::default().sample(&img);

        assert!(color.r.abs_diff(200) <= 1, "{}", color);
        assert!(color.g.abs_diff(100) <= 1, "{}", color);
        assert!(color.b.abs_diff(50) <= 1, "{}", color);
    }

    #[test]
    fn half_and_half_image_averages_channels() {
        let img = RgbImage::from_fn(40, 40, |x, _| {
            if x < 20 { Rgb([0, 0, 0]) } else { Rgb([200, 200, 200]) }
        });
        let color = ColorSampler::default().sample(&DynamicImage::ImageRgb8(img));

        assert!(color.r.abs_diff(100) <= 2, "{}", color);
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
    }

    #[test]
    fn empty_image_is_black() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        assert_eq!(ColorSampler::default().sample(&img), Color::new(0, 0, 0));
    }
}
