pub mod classifier;
pub mod color;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reference;

pub use classifier::DenominationClassifier;
pub use color::ColorSampler;
pub use config::{ColorConfig, MatchingConfig, PipelineConfig, ShapeConfig};
pub use detection::ShapeDetector;
pub use error::{ClassifyError, Result};
pub use models::{Classification, Color, Detection, Match, ObjectKind, Outcome};
pub use pipeline::ClassificationPipeline;
pub use reference::{BanknoteReference, CoinReference, ReferenceTables};
