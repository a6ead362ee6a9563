//! Tunable parameters for the classification pipeline.
//!
//! Every constant the detectors and the matcher depend on lives here so it
//! can be adjusted for a different camera distance or lighting setup without
//! touching the code. Configuration loads from JSON; sections missing from the
//! file keep their defaults.
//!
//! ```no_run
//! use pesoscan::PipelineConfig;
//! use std::path::Path;
//!
//! let config = PipelineConfig::from_json_file(Path::new("pesoscan.json"))?;
//! # Ok::<(), pesoscan::ClassifyError>(())
//! ```

use crate::error::{ClassifyError, Result};
use crate::reference::ReferenceTables;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub shape: ShapeConfig,
    pub color: ColorConfig,
    pub matching: MatchingConfig,
    pub references: ReferenceTables,
}

/// Shape detection parameters.
///
/// The radius bounds and the banknote area are tuned for a phone held
/// roughly 20cm above the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Gaussian sigma applied before circle detection
    pub blur_sigma: f32,

    /// Minimum distance between detected circle centers (pixels)
    pub min_center_distance: f32,

    /// Canny high threshold for circle edges; the low threshold is half of it
    pub edge_threshold: f32,

    /// Votes a center (and its radius) needs to count as a circle
    pub accumulator_threshold: u32,

    pub min_radius: u32,
    pub max_radius: u32,

    /// Gray level at or below which a pixel belongs to the object
    pub binarize_threshold: u8,

    /// Polygon approximation tolerance as a fraction of contour perimeter
    pub polygon_epsilon_ratio: f64,

    /// Smallest quadrilateral area (pixels²) accepted as a banknote
    pub min_banknote_area: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 2.0,
            min_center_distance: 50.0,
            edge_threshold: 50.0,
            accumulator_threshold: 30,
            min_radius: 20,
            max_radius: 200,
            binarize_threshold: 240,
            polygon_epsilon_ratio: 0.02,
            min_banknote_area: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Gaussian sigma applied before averaging
    pub blur_sigma: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { blur_sigma: 1.25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Fixed image scale; assumes a constant camera distance
    pub pixels_per_mm: f64,

    /// Multiplier on the diameter difference (mm) in the coin score
    pub diameter_weight: f64,

    /// Reject the best match when its score exceeds this value.
    /// `None` always returns the closest reference.
    pub max_distance: Option<f64>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            pixels_per_mm: 5.0,
            diameter_weight: 10.0,
            max_distance: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ClassifyError::config_load(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text)
            .map_err(|e| ClassifyError::config_load("invalid JSON configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClassifyError::config_load("cannot serialize configuration", e))
    }

    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        self.color.validate()?;
        self.matching.validate()
    }
}

impl ShapeConfig {
    pub fn validate(&self) -> Result<()> {
        positive("shape.blur_sigma", self.blur_sigma as f64)?;
        non_negative("shape.min_center_distance", self.min_center_distance as f64)?;
        positive("shape.edge_threshold", self.edge_threshold as f64)?;
        positive("shape.polygon_epsilon_ratio", self.polygon_epsilon_ratio)?;
        non_negative("shape.min_banknote_area", self.min_banknote_area)?;

        if self.accumulator_threshold == 0 {
            return Err(ClassifyError::invalid_parameter(
                "shape.accumulator_threshold",
                0,
                "must be at least 1",
            ));
        }
        if self.min_radius == 0 || self.min_radius > self.max_radius {
            return Err(ClassifyError::invalid_parameter(
                "shape.min_radius",
                self.min_radius,
                format!("must be in 1..={}", self.max_radius),
            ));
        }
        Ok(())
    }
}

impl ColorConfig {
    pub fn validate(&self) -> Result<()> {
        positive("color.blur_sigma", self.blur_sigma as f64)
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<()> {
        positive("matching.pixels_per_mm", self.pixels_per_mm)?;
        non_negative("matching.diameter_weight", self.diameter_weight)?;
        if let Some(max) = self.max_distance {
            non_negative("matching.max_distance", max)?;
        }
        Ok(())
    }
}

fn positive(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ClassifyError::invalid_parameter(parameter, value, "must be positive"))
    }
}

fn non_negative(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ClassifyError::invalid_parameter(parameter, value, "must not be negative"))
    }
}
