//! Position-specific feature weight tables.

use crate::cli::types::{Position, Sport};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed drift from 1.0 when summing a profile's weights.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How a raw season value becomes a comparable feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureScaling {
    #[default]
    Per90,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub metric: String,
    pub weight: f64,
    #[serde(default)]
    pub scaling: FeatureScaling,
}

impl FeatureWeight {
    pub fn per90(metric: &str, weight: f64) -> Self {
        Self {
            metric: metric.to_string(),
            weight,
            scaling: FeatureScaling::Per90,
        }
    }

    pub fn raw(metric: &str, weight: f64) -> Self {
        Self {
            metric: metric.to_string(),
            weight,
            scaling: FeatureScaling::Raw,
        }
    }
}

/// Lookup table `position -> ordered (metric, weight)` list.
///
/// Keys are position names so the table round-trips through TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTables(BTreeMap<String, Vec<FeatureWeight>>);

impl WeightTables {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, position: Position, profile: Vec<FeatureWeight>) {
        self.0.insert(position.to_string(), profile);
    }

    /// Profile for `position`, or a configuration error naming it.
    pub fn profile(&self, position: Position) -> Result<&[FeatureWeight]> {
        self.0
            .get(&position.to_string())
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::MissingWeightTable {
                position: position.to_string(),
            })
    }

    /// Check one profile exists and sums to 1.0.
    pub fn validate_position(&self, position: Position) -> Result<()> {
        let profile = self.profile(position)?;
        if profile.is_empty() {
            return Err(EngineError::MissingWeightTable {
                position: position.to_string(),
            });
        }
        if let Some(bad) = profile.iter().find(|f| f.weight.is_nan() || f.weight < 0.0) {
            return Err(EngineError::InvalidConfig {
                message: format!("negative weight {} for {} in {}", bad.weight, bad.metric, position),
            });
        }
        let sum: f64 = profile.iter().map(|f| f.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidWeightSum {
                position: position.to_string(),
                sum,
            });
        }
        Ok(())
    }

    /// Validate every position of every sport, plus reject unknown keys.
    pub fn validate(&self) -> Result<()> {
        for key in self.0.keys() {
            key.parse::<Position>()?;
        }
        for sport in Sport::all() {
            for position in sport.positions() {
                self.validate_position(*position)?;
            }
        }
        Ok(())
    }
}

impl Default for WeightTables {
    fn default() -> Self {
        use FeatureWeight as W;

        let mut tables = Self::empty();

        tables.insert(
            Position::GK,
            vec![
                W::per90("saves", 0.35),
                W::per90("clean_sheets", 0.30),
                W::per90("bonus", 0.15),
                W::per90("total_points", 0.20),
            ],
        );
        tables.insert(
            Position::DEF,
            vec![
                W::per90("expected_goals", 0.20),
                W::per90("expected_assists", 0.20),
                W::per90("clean_sheets", 0.30),
                W::per90("bonus", 0.10),
                W::per90("total_points", 0.20),
            ],
        );
        tables.insert(
            Position::MID,
            vec![
                W::per90("expected_goals", 0.30),
                W::per90("expected_assists", 0.30),
                W::per90("creativity", 0.15),
                W::per90("bonus", 0.10),
                W::per90("total_points", 0.15),
            ],
        );
        tables.insert(
            Position::FWD,
            vec![
                W::per90("expected_goals", 0.45),
                W::per90("expected_assists", 0.20),
                W::per90("threat", 0.15),
                W::per90("bonus", 0.05),
                W::per90("total_points", 0.15),
            ],
        );

        tables.insert(
            Position::PG,
            vec![
                W::per90("points", 0.30),
                W::per90("assists", 0.35),
                W::per90("steals", 0.10),
                W::per90("threes", 0.15),
                W::per90("rebounds", 0.10),
            ],
        );
        tables.insert(
            Position::SG,
            vec![
                W::per90("points", 0.40),
                W::per90("threes", 0.25),
                W::per90("assists", 0.15),
                W::per90("steals", 0.10),
                W::per90("rebounds", 0.10),
            ],
        );
        tables.insert(
            Position::SF,
            vec![
                W::per90("points", 0.35),
                W::per90("rebounds", 0.25),
                W::per90("assists", 0.15),
                W::per90("steals", 0.10),
                W::per90("blocks", 0.15),
            ],
        );
        tables.insert(
            Position::PF,
            vec![
                W::per90("points", 0.30),
                W::per90("rebounds", 0.35),
                W::per90("blocks", 0.20),
                W::per90("assists", 0.05),
                W::per90("steals", 0.10),
            ],
        );
        tables.insert(
            Position::C,
            vec![
                W::per90("rebounds", 0.40),
                W::per90("blocks", 0.25),
                W::per90("points", 0.25),
                W::per90("assists", 0.10),
            ],
        );

        // NFL feeds carry no minutes, so football profiles compare season totals
        tables.insert(
            Position::QB,
            vec![
                W::raw("passing_yards", 0.35),
                W::raw("passing_tds", 0.35),
                W::raw("rushing_yards", 0.15),
                W::raw("rushing_tds", 0.15),
            ],
        );
        tables.insert(
            Position::RB,
            vec![
                W::raw("rushing_yards", 0.40),
                W::raw("rushing_tds", 0.25),
                W::raw("receptions", 0.20),
                W::raw("receiving_yards", 0.15),
            ],
        );
        tables.insert(
            Position::WR,
            vec![
                W::raw("receiving_yards", 0.40),
                W::raw("receptions", 0.25),
                W::raw("receiving_tds", 0.25),
                W::raw("targets", 0.10),
            ],
        );
        tables.insert(
            Position::TE,
            vec![
                W::raw("receiving_yards", 0.35),
                W::raw("receptions", 0.30),
                W::raw("receiving_tds", 0.25),
                W::raw("targets", 0.10),
            ],
        );

        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles_sum_to_one() {
        let tables = WeightTables::default();
        for sport in Sport::all() {
            for position in sport.positions() {
                let sum: f64 = tables.profile(*position).unwrap().iter().map(|f| f.weight).sum();
                assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", position, sum);
            }
        }
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_missing_profile_is_configuration_error() {
        let mut tables = WeightTables::default();
        tables.0.remove("C");

        let err = tables.validate().unwrap_err();
        match err {
            EngineError::MissingWeightTable { position } => assert_eq!(position, "C"),
            other => panic!("Expected MissingWeightTable, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_sum_is_not_silently_normalized() {
        let mut tables = WeightTables::default();
        tables.insert(
            Position::MID,
            vec![FeatureWeight::per90("expected_goals", 0.5), FeatureWeight::per90("bonus", 0.4)],
        );

        match tables.validate_position(Position::MID).unwrap_err() {
            EngineError::InvalidWeightSum { position, sum } => {
                assert_eq!(position, "MID");
                assert!((sum - 0.9).abs() < 1e-12);
            }
            other => panic!("Expected InvalidWeightSum, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_position_key_rejected() {
        let mut tables = WeightTables::default();
        tables.0.insert("K".to_string(), vec![FeatureWeight::raw("field_goals", 1.0)]);
        assert!(matches!(
            tables.validate(),
            Err(EngineError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_tables_round_trip_through_toml() {
        let tables = WeightTables::default();
        let text = toml::to_string(&tables).unwrap();
        let back: WeightTables = toml::from_str(&text).unwrap();
        assert_eq!(back, tables);
    }
}
