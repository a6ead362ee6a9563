pub mod preprocessing;
pub mod contours;
pub mod circles;

use crate::config::ShapeConfig;
use crate::models::Detection;
use image::DynamicImage;
use log::{debug, info};

/// Decides whether a photo shows a coin, a banknote, or neither
#[derive(Debug, Clone)]
pub struct ShapeDetector {
    config: ShapeConfig,
}

impl ShapeDetector {
    pub fn new(config: ShapeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Classify the shape of the single object in `img`.
    ///
    /// Circles take precedence: when any circle is found the strongest one is
    /// reported as a coin. Only then are quadrilaterals considered, and the
    /// first qualifying one in raster order makes it a banknote.
    pub fn detect(&self, img: &DynamicImage) -> Detection {
        let gray = preprocessing::to_grayscale(img);
        if gray.width() == 0 || gray.height() == 0 {
            return Detection::Unknown;
        }

        let blurred = preprocessing::apply_blur(&gray, self.config.blur_sigma);
        let circles = circles::detect_circles(&blurred, &self.config);
        debug!("Detected {} circles", circles.len());

        if let Some(circle) = circles.first() {
            info!(
                "Coin detected at ({}, {}) with radius {:.1}px",
                circle.x, circle.y, circle.radius
            );
            return Detection::Coin { pixel_radius: circle.radius };
        }

        // Unblurred gray keeps the banknote corners sharp
        let binary = preprocessing::binarize_inverted(&gray, self.config.binarize_threshold);
        if let Some(quad) = contours::find_quadrilateral(&binary, &self.config) {
            info!("Banknote detected, area {:.0}px²", quad.area);
            return Detection::Banknote;
        }

        info!("No coin or banknote shape found");
        Detection::Unknown
    }
}

impl Default for ShapeDetector {
    fn default() -> Self {
        Self::new(ShapeConfig::default())
    }
}
