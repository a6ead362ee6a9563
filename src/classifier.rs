use crate::config::MatchingConfig;
use crate::models::{Color, Detection, Match};
use crate::reference::ReferenceTables;
use log::debug;
use std::sync::Arc;

/// Nearest-neighbour lookup of a detected object in the reference tables
#[derive(Debug, Clone)]
pub struct DenominationClassifier {
    tables: Arc<ReferenceTables>,
    config: MatchingConfig,
}

impl DenominationClassifier {
    pub fn new(tables: Arc<ReferenceTables>, config: MatchingConfig) -> Self {
        Self { tables, config }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Physical diameter implied by a pixel radius at the configured scale
    pub fn diameter_mm(&self, pixel_radius: f32) -> f64 {
        (pixel_radius as f64 * 2.0) / self.config.pixels_per_mm
    }

    /// Closest reference entry for the detected object.
    ///
    /// Returns `None` for an unknown shape, for an empty table, or when a
    /// maximum distance is configured and even the best entry exceeds it.
    pub fn classify(&self, detection: &Detection, color: Color) -> Option<Match> {
        let best = match *detection {
            Detection::Banknote => self.closest_banknote(color),
            Detection::Coin { pixel_radius } => self.closest_coin(color, pixel_radius),
            Detection::Unknown => return None,
        }?;

        if let Some(max) = self.config.max_distance {
            if best.score > max {
                debug!(
                    "Best match {} rejected: score {:.2} exceeds {:.2}",
                    best.denomination, best.score, max
                );
                return None;
            }
        }
        Some(best)
    }

    fn closest_banknote(&self, color: Color) -> Option<Match> {
        let candidates = self
            .tables
            .banknotes()
            .iter()
            .map(|b| (b.denomination, color.distance(&b.color)));

        first_minimum(candidates).map(|(denomination, score)| Match {
            denomination,
            score,
            diameter_mm: None,
        })
    }

    fn closest_coin(&self, color: Color, pixel_radius: f32) -> Option<Match> {
        let diameter = self.diameter_mm(pixel_radius);
        debug!("Estimated coin diameter {:.2}mm from radius {:.1}px", diameter, pixel_radius);

        let candidates = self.tables.coins().iter().map(|c| {
            let score = color.distance(&c.color)
                + self.config.diameter_weight * (diameter - c.diameter_mm).abs();
            (c.denomination, score)
        });

        first_minimum(candidates).map(|(denomination, score)| Match {
            denomination,
            score,
            diameter_mm: Some(diameter),
        })
    }
}

/// Lowest score, keeping the earliest entry on ties
fn first_minimum(candidates: impl Iterator<Item = (u32, f64)>) -> Option<(u32, f64)> {
    candidates.fold(None, |best, (denomination, score)| match best {
        Some((_, best_score)) if score >= best_score => best,
        _ => Some((denomination, score)),
    })
}
