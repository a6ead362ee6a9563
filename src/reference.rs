//! Reference signatures of known denominations.
//!
//! Tables keep their declared order. Matching walks them front to back, so
//! when two entries score the same the earlier one wins.

use crate::error::{ClassifyError, Result};
use crate::models::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanknoteReference {
    pub denomination: u32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinReference {
    pub denomination: u32,
    pub color: Color,
    pub diameter_mm: f64,
}

/// Banknote and coin tables, validated once and then read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTables")]
pub struct ReferenceTables {
    banknotes: Vec<BanknoteReference>,
    coins: Vec<CoinReference>,
}

#[derive(Deserialize)]
struct RawTables {
    banknotes: Vec<BanknoteReference>,
    coins: Vec<CoinReference>,
}

impl TryFrom<RawTables> for ReferenceTables {
    type Error = ClassifyError;

    fn try_from(raw: RawTables) -> Result<Self> {
        ReferenceTables::new(raw.banknotes, raw.coins)
    }
}

impl ReferenceTables {
    pub fn new(banknotes: Vec<BanknoteReference>, coins: Vec<CoinReference>) -> Result<Self> {
        check_unique("banknote", banknotes.iter().map(|b| b.denomination))?;
        check_unique("coin", coins.iter().map(|c| c.denomination))?;

        for coin in &coins {
            if !(coin.diameter_mm.is_finite() && coin.diameter_mm > 0.0) {
                return Err(ClassifyError::InvalidReference {
                    denomination: coin.denomination,
                    reason: format!("diameter must be positive, got {}", coin.diameter_mm),
                });
            }
        }

        Ok(Self { banknotes, coins })
    }

    /// Current Colombian peso banknotes and coins
    pub fn colombian() -> Self {
        let banknotes = vec![
            banknote(2000, 0, 0, 255),     // blue
            banknote(5000, 200, 100, 0),   // brown
            banknote(10000, 255, 0, 0),    // red
            banknote(20000, 0, 255, 0),    // green
            banknote(50000, 200, 0, 200),  // purple
            banknote(100000, 255, 165, 0), // orange
        ];

        let silver = Color::new(140, 140, 140);
        let coins = vec![
            CoinReference { denomination: 50, color: silver, diameter_mm: 17.0 },
            CoinReference { denomination: 100, color: silver, diameter_mm: 20.3 },
            CoinReference { denomination: 200, color: silver, diameter_mm: 22.4 },
            CoinReference { denomination: 500, color: silver, diameter_mm: 23.5 },
            // bimetallic silver/gold
            CoinReference { denomination: 1000, color: Color::new(180, 120, 120), diameter_mm: 26.7 },
        ];

        Self { banknotes, coins }
    }

    pub fn banknotes(&self) -> &[BanknoteReference] {
        &self.banknotes
    }

    pub fn coins(&self) -> &[CoinReference] {
        &self.coins
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::colombian()
    }
}

fn banknote(denomination: u32, r: u8, g: u8, b: u8) -> BanknoteReference {
    BanknoteReference {
        denomination,
        color: Color::new(r, g, b),
    }
}

fn check_unique(table: &'static str, denominations: impl Iterator<Item = u32>) -> Result<()> {
    let mut seen = HashSet::new();
    for denomination in denominations {
        if !seen.insert(denomination) {
            return Err(ClassifyError::DuplicateDenomination { table, denomination });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colombian_tables_pass_validation() {
        let tables = ReferenceTables::colombian();
        let rebuilt =
            ReferenceTables::new(tables.banknotes().to_vec(), tables.coins().to_vec()).unwrap();
        assert_eq!(rebuilt, tables);
        assert_eq!(tables.banknotes().len(), 6);
        assert_eq!(tables.coins().len(), 5);
    }

    #[test]
    fn duplicate_banknote_rejected() {
        let err = ReferenceTables::new(
            vec![banknote(2000, 0, 0, 255), banknote(2000, 1, 1, 1)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::DuplicateDenomination { table: "banknote", denomination: 2000 }
        ));
    }

    #[test]
    fn non_positive_diameter_rejected() {
        let err = ReferenceTables::new(
            vec![],
            vec![CoinReference { denomination: 50, color: Color::new(1, 2, 3), diameter_mm: 0.0 }],
        )
        .unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidReference { denomination: 50, .. }));
    }

    #[test]
    fn deserialization_runs_validation() {
        let json = r#"{
            "banknotes": [],
            "coins": [
                {"denomination": 100, "color": {"r": 1, "g": 2, "b": 3}, "diameter_mm": 20.3},
                {"denomination": 100, "color": {"r": 1, "g": 2, "b": 3}, "diameter_mm": 22.4}
            ]
        }"#;
        let result: std::result::Result<ReferenceTables, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
