use crate::classifier::DenominationClassifier;
use crate::color::ColorSampler;
use crate::config::PipelineConfig;
use crate::detection::ShapeDetector;
use crate::error::{ClassifyError, Result};
use crate::models::{Classification, Color, Detection, Outcome};
use image::{DynamicImage, GenericImageView};
use log::{debug, info};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

/// Shape detection, color sampling and denomination lookup for one photo
#[derive(Debug, Clone)]
pub struct ClassificationPipeline {
    detector: ShapeDetector,
    sampler: ColorSampler,
    classifier: DenominationClassifier,
    parallel: bool,
}

impl ClassificationPipeline {
    /// Validate `config` and build the three stages from it
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let PipelineConfig {
            shape,
            color,
            matching,
            references,
        } = config;

        Ok(Self {
            detector: ShapeDetector::new(shape),
            sampler: ColorSampler::new(color),
            classifier: DenominationClassifier::new(Arc::new(references), matching),
            parallel: true,
        })
    }

    /// Run detection and sampling on separate threads (default) or one after the other
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn detector(&self) -> &ShapeDetector {
        &self.detector
    }

    pub fn sampler(&self) -> &ColorSampler {
        &self.sampler
    }

    pub fn classifier(&self) -> &DenominationClassifier {
        &self.classifier
    }

    /// Classify the single coin or banknote in `img`.
    ///
    /// An unrecognized shape is a normal outcome, not an error. Errors are
    /// reserved for empty images and stages that fail unexpectedly.
    pub fn run(&self, img: &DynamicImage) -> Result<Outcome> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ClassifyError::EmptyImage { width, height });
        }
        debug!("Classifying {}x{} image", width, height);

        let (detection, color) = if self.parallel {
            self.analyse_parallel(img)?
        } else {
            self.analyse_sequential(img)?
        };

        let Some(kind) = detection.kind() else {
            return Ok(Outcome::Unrecognized);
        };

        let best = guarded("classification", || self.classifier.classify(&detection, color))?;
        let outcome = match best {
            Some(m) => {
                info!("Classified {} as {} COP (score {:.2})", kind, m.denomination, m.score);
                Outcome::Classified(Classification {
                    kind,
                    denomination: m.denomination,
                    color,
                    score: m.score,
                    diameter_mm: m.diameter_mm,
                })
            }
            None => {
                info!("No {} denomination close enough to color {}", kind, color);
                Outcome::NoMatch { kind, color }
            }
        };
        Ok(outcome)
    }

    fn analyse_sequential(&self, img: &DynamicImage) -> Result<(Detection, Color)> {
        guarded("analysis", || (self.detector.detect(img), self.sampler.sample(img)))
    }

    fn analyse_parallel(&self, img: &DynamicImage) -> Result<(Detection, Color)> {
        thread::scope(|scope| {
            let detect = scope.spawn(|| self.detector.detect(img));
            let sample = scope.spawn(|| self.sampler.sample(img));

            let detection = detect
                .join()
                .map_err(|payload| stage_failure("shape detection", payload));
            let color = sample
                .join()
                .map_err(|payload| stage_failure("color sampling", payload));
            Ok((detection?, color?))
        })
    }
}

impl Default for ClassificationPipeline {
    fn default() -> Self {
        Self {
            detector: ShapeDetector::default(),
            sampler: ColorSampler::default(),
            classifier: DenominationClassifier::new(
                Arc::new(Default::default()),
                Default::default(),
            ),
            parallel: true,
        }
    }
}

/// Run one stage, turning a panic into a processing error
fn guarded<T>(stage: &str, f: impl FnOnce() -> T) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| stage_failure(stage, payload))
}

fn stage_failure(stage: &str, payload: Box<dyn Any + Send>) -> ClassifyError {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    ClassifyError::Processing {
        message: format!("{} failed: {}", stage, detail),
    }
}
