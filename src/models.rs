use serde::{Deserialize, Serialize};
use std::fmt;

/// Color triplet in RGB channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in channel space
    pub fn distance(&self, other: &Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Kind of object found in the photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Coin,
    Banknote,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Coin => write!(f, "coin"),
            ObjectKind::Banknote => write!(f, "banknote"),
        }
    }
}

/// Result of shape detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    Coin { pixel_radius: f32 },
    Banknote,
    Unknown,
}

impl Detection {
    pub fn kind(&self) -> Option<ObjectKind> {
        match self {
            Detection::Coin { .. } => Some(ObjectKind::Coin),
            Detection::Banknote => Some(ObjectKind::Banknote),
            Detection::Unknown => None,
        }
    }
}

/// Best reference entry for a detected object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub denomination: u32,
    /// Color distance for banknotes, weighted color+diameter score for coins
    pub score: f64,
    /// Estimated physical diameter (coins only)
    pub diameter_mm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: ObjectKind,
    pub denomination: u32,
    pub color: Color,
    pub score: f64,
    pub diameter_mm: Option<f64>,
}

/// What the pipeline hands back to its caller
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Classified(Classification),
    /// Neither a circle nor a banknote-sized quadrilateral was found
    Unrecognized,
    /// Shape found but no reference entry within the configured maximum distance
    NoMatch { kind: ObjectKind, color: Color },
}

impl Outcome {
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            Outcome::Classified(c) => Some(c),
            _ => None,
        }
    }

    pub fn denomination(&self) -> Option<u32> {
        self.classification().map(|c| c.denomination)
    }

    /// Reason string for outcomes without a denomination
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Outcome::Classified(_) => None,
            Outcome::Unrecognized => {
                Some("could not determine whether the object is a coin or banknote")
            }
            Outcome::NoMatch { .. } => Some("could not determine the denomination"),
        }
    }
}
