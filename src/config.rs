//! Versioned engine configuration.
//!
//! Every heuristic constant lives here, one section per component, so tests
//! and deployments can vary them without touching scoring code. Missing
//! sections fall back to defaults.

use crate::engine::{
    captaincy::CaptaincyConfig, differential::DifferentialConfig, fixture_difficulty::FixtureBandConfig,
    opportunity::OpportunityConfig, similarity::SimilarityQuery, trend::SurgeConfig, trend::TrendConfig,
    weights::WeightTables,
};
use crate::error::{EngineError, Result};
use crate::CONFIG_ENV_VAR;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_VERSION: u32 = 1;

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub version: u32,
    pub similarity: SimilarityQuery,
    pub trend: TrendConfig,
    pub surge: SurgeConfig,
    pub opportunity: OpportunityConfig,
    pub differential: DifferentialConfig,
    pub captaincy: CaptaincyConfig,
    pub fixture_bands: FixtureBandConfig,
    pub weights: WeightTables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            similarity: SimilarityQuery::default(),
            trend: TrendConfig::default(),
            surge: SurgeConfig::default(),
            opportunity: OpportunityConfig::default(),
            differential: DifferentialConfig::default(),
            captaincy: CaptaincyConfig::default(),
            fixture_bands: FixtureBandConfig::default(),
            weights: WeightTables::default(),
        }
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be positive, got {}", name, value)))
    }
}

fn require_unit_sum(name: &str, parts: &[f64]) -> Result<()> {
    let sum: f64 = parts.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(invalid(format!("{} weights sum to {}, expected 1.0", name, sum)));
    }
    Ok(())
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Stable digest of every setting, so results scored under one config are
    /// never served for another.
    pub fn fingerprint(&self) -> Result<String> {
        let mut hasher = DefaultHasher::new();
        toml::to_string(self)?.hash(&mut hasher);
        Ok(format!("{:016x}", hasher.finish()))
    }

    /// Load from `path`, else the `FANTASY_SCOUT_CONFIG` env var, else defaults,
    /// and validate before returning.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self> {
        let path = path.or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));
        let config = match path {
            Some(p) => {
                debug!(path = %p.display(), "loading engine config");
                Self::from_path(&p)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Startup validation. Any failure here is a programming error and aborts.
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(invalid(format!(
                "unsupported config version {}, expected {}",
                self.version, CONFIG_VERSION
            )));
        }

        self.weights.validate()?;
        self.fixture_bands.validate()?;

        let t = &self.trend;
        require_positive("trend.rising_factor", t.rising_factor)?;
        require_positive("trend.falling_factor", t.falling_factor)?;
        if t.falling_factor > t.rising_factor {
            return Err(invalid("trend.falling_factor exceeds trend.rising_factor"));
        }
        if t.window < 2 {
            return Err(invalid("trend.window must hold at least 2 games"));
        }

        require_positive("surge.threshold", self.surge.threshold)?;
        if self.surge.window == 0 {
            return Err(invalid("surge.window must be at least 1"));
        }

        if self.opportunity.max_absences == 0 {
            return Err(invalid("opportunity.max_absences must be at least 1"));
        }

        let d = &self.differential;
        require_positive("differential.ownership_floor", d.ownership_floor)?;
        require_positive("differential.scale", d.scale)?;
        require_positive("differential.comeback_multiplier", d.comeback_multiplier)?;
        require_positive("differential.fresh_debut_multiplier", d.fresh_debut_multiplier)?;
        if d.horizon_fixtures == 0 {
            return Err(invalid("differential.horizon_fixtures must be at least 1"));
        }

        let c = &self.captaincy;
        require_positive("captaincy.recent_ceiling", c.recent_ceiling)?;
        require_positive("captaincy.season_ceiling", c.season_ceiling)?;
        require_unit_sum("captaincy production", &[c.recent_weight, c.season_weight])?;
        require_unit_sum("captaincy opponent", &[c.difficulty_weight, c.defence_weight])?;
        require_unit_sum("captaincy composite", &[c.potential_weight, c.weakness_weight, c.home_weight])?;
        if c.defence_ceiling <= c.defence_floor {
            return Err(invalid("captaincy.defence_ceiling must exceed defence_floor"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Position;
    use crate::engine::weights::FeatureWeight;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [differential]
            comeback_bonus = 25.0

            [trend]
            rising_factor = 1.25
            "#,
        )
        .unwrap();

        assert_eq!(config.differential.comeback_bonus, 25.0);
        assert_eq!(config.differential.fresh_debut_bonus, 15.0);
        assert_eq!(config.trend.rising_factor, 1.25);
        assert_eq!(config.trend.falling_factor, 0.8);
        assert_eq!(config.weights, WeightTables::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weight_override_must_sum_to_one() {
        let mut config = EngineConfig::default();
        config.weights.insert(
            Position::GK,
            vec![FeatureWeight::per90("saves", 0.7), FeatureWeight::per90("bonus", 0.2)],
        );
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("GK"));
    }

    #[test]
    fn test_composite_weights_validated() {
        let mut config = EngineConfig::default();
        config.captaincy.home_weight = 0.2;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let config = EngineConfig::from_toml_str("version = 7").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scout.toml");
        fs::write(&path, "[surge]\nthreshold = 1.15\n").unwrap();

        let config = EngineConfig::resolve(Some(path)).unwrap();
        assert_eq!(config.surge.threshold, 1.15);
    }

    #[test]
    fn test_resolve_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = EngineConfig::resolve(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn test_fingerprint_tracks_settings() {
        let default = EngineConfig::default();
        assert_eq!(default.fingerprint().unwrap(), EngineConfig::default().fingerprint().unwrap());

        let mut tuned = EngineConfig::default();
        tuned.differential.comeback_bonus = 500.0;
        assert_ne!(default.fingerprint().unwrap(), tuned.fingerprint().unwrap());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string(&EngineConfig::default()).unwrap();
        let back = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, EngineConfig::default());
    }
}
