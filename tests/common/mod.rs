mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from pesoscan for tests
pub use pesoscan::{
    ClassificationPipeline, Color, Detection, ObjectKind, Outcome, PipelineConfig, ShapeDetector,
};
