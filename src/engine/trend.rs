//! Short-window trend and surge detection over game logs.

use super::normalize::per90;
use crate::cli::types::Sport;
use crate::model::{GameLogEntry, StatBag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Flat => "flat",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Latest must exceed previous times this to be rising.
    pub rising_factor: f64,
    /// Latest must fall below previous times this to be falling.
    pub falling_factor: f64,
    /// Games in the recent-form window.
    pub window: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            rising_factor: 1.2,
            falling_factor: 0.8,
            window: 5,
        }
    }
}

/// Compare the last value against the one before it.
///
/// Fewer than two values is `Flat`. Both comparisons are strict, so
/// `[10, 12]` with a 1.2 factor stays flat.
pub fn classify_trend(values: &[f64], config: &TrendConfig) -> Trend {
    let [.., previous, latest] = values else {
        return Trend::Flat;
    };
    if *latest > previous * config.rising_factor {
        Trend::Rising
    } else if *latest < previous * config.falling_factor {
        Trend::Falling
    } else {
        Trend::Flat
    }
}

/// One metric across a window, oldest first; missing stats read as zero.
pub fn metric_series(window: &[GameLogEntry], metric: &str) -> Vec<f64> {
    window.iter().map(|g| g.stat(metric)).collect()
}

pub fn classify_metric_trend(window: &[GameLogEntry], metric: &str, config: &TrendConfig) -> Trend {
    classify_trend(&metric_series(window, metric), config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Sum,
}

pub fn aggregate(values: &[f64], aggregation: Aggregation) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total: f64 = values.iter().sum();
    match aggregation {
        Aggregation::Sum => total,
        Aggregation::Mean => total / values.len() as f64,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeConfig {
    /// Recent aggregate must exceed `baseline * threshold`.
    pub threshold: f64,
    /// Metrics that must surge individually before the player is flagged.
    pub min_surging_metrics: usize,
    pub aggregation: Aggregation,
    /// Games in the surge window.
    pub window: usize,
    /// Metrics to check; empty means the sport's defaults.
    pub metrics: Vec<String>,
}

impl Default for SurgeConfig {
    fn default() -> Self {
        Self {
            threshold: 1.2,
            min_surging_metrics: 1,
            aggregation: Aggregation::Mean,
            window: 3,
            metrics: Vec::new(),
        }
    }
}

impl SurgeConfig {
    pub fn metrics_for(&self, sport: Sport) -> Vec<String> {
        if self.metrics.is_empty() {
            default_surge_metrics(sport).iter().map(|m| m.to_string()).collect()
        } else {
            self.metrics.clone()
        }
    }
}

pub fn default_surge_metrics(sport: Sport) -> &'static [&'static str] {
    match sport {
        Sport::Soccer => &["expected_goals", "expected_assists", "total_points"],
        Sport::Basketball => &["points", "rebounds", "assists", "steals", "blocks", "threes"],
        Sport::Football => &["fantasy_points", "targets", "rushing_yards"],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeResult {
    pub surge: bool,
    pub surging_metrics: usize,
    pub metrics: Vec<String>,
}

/// Check each metric's recent aggregate against `baseline` (in the same
/// aggregation terms) and count those above the threshold.
pub fn detect_surge(
    window: &[GameLogEntry],
    baseline: &StatBag,
    metrics: &[String],
    config: &SurgeConfig,
) -> SurgeResult {
    if window.is_empty() {
        return SurgeResult {
            surge: false,
            surging_metrics: 0,
            metrics: Vec::new(),
        };
    }

    let surging: Vec<String> = metrics
        .iter()
        .filter(|metric| {
            let recent = aggregate(&metric_series(window, metric), config.aggregation);
            recent > baseline.get(metric) * config.threshold
        })
        .cloned()
        .collect();

    SurgeResult {
        surge: surging.len() >= config.min_surging_metrics.max(1),
        surging_metrics: surging.len(),
        metrics: surging,
    }
}

/// Per-game season baseline from a full log, expressed for `aggregation`
/// over a window of `window_len` games.
pub fn season_baseline(
    season_log: &[GameLogEntry],
    metrics: &[String],
    aggregation: Aggregation,
    window_len: usize,
) -> StatBag {
    metrics
        .iter()
        .map(|metric| {
            let mean = aggregate(&metric_series(season_log, metric), Aggregation::Mean);
            let value = match aggregation {
                Aggregation::Mean => mean,
                Aggregation::Sum => mean * window_len as f64,
            };
            (metric.clone(), value)
        })
        .collect()
}

/// Per-90 rate of `metric` over the whole window.
pub fn window_per90(window: &[GameLogEntry], metric: &str) -> f64 {
    let total: f64 = window.iter().map(|g| g.stat(metric)).sum();
    let minutes: f64 = window.iter().map(|g| g.minutes_played as f64).sum();
    per90(total, minutes)
}

pub fn window_rates(window: &[GameLogEntry], metrics: &[String]) -> BTreeMap<String, f64> {
    metrics
        .iter()
        .map(|m| (m.clone(), window_per90(window, m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{PlayerId, Round};

    fn game(round: u16, minutes: u32, points: f64) -> GameLogEntry {
        GameLogEntry {
            player_id: PlayerId::new(1),
            round_index: Round::new(round),
            minutes_played: minutes,
            stats: StatBag::new().with("points", points),
        }
    }

    #[test]
    fn test_boundary_exact_is_flat() {
        let config = TrendConfig::default();
        assert_eq!(classify_trend(&[10.0, 12.0], &config), Trend::Flat);
        assert_eq!(classify_trend(&[10.0, 8.0], &config), Trend::Flat);
    }

    #[test]
    fn test_rising_and_falling() {
        let config = TrendConfig::default();
        assert_eq!(classify_trend(&[3.0, 10.0, 12.5], &config), Trend::Rising);
        assert_eq!(classify_trend(&[10.0, 7.9], &config), Trend::Falling);
        // Only the last two values matter
        assert_eq!(classify_trend(&[100.0, 1.0, 1.0], &config), Trend::Flat);
    }

    #[test]
    fn test_insufficient_data_is_flat() {
        let config = TrendConfig::default();
        assert_eq!(classify_trend(&[], &config), Trend::Flat);
        assert_eq!(classify_trend(&[42.0], &config), Trend::Flat);
    }

    #[test]
    fn test_missing_metric_treated_as_zero() {
        let window = vec![game(1, 30, 10.0), game(2, 30, 0.0)];
        assert_eq!(metric_series(&window, "rebounds"), vec![0.0, 0.0]);
        assert_eq!(classify_metric_trend(&window, "rebounds", &TrendConfig::default()), Trend::Flat);
        assert_eq!(classify_metric_trend(&window, "points", &TrendConfig::default()), Trend::Falling);
    }

    #[test]
    fn test_surge_counts_metrics() {
        let window = vec![
            GameLogEntry {
                stats: StatBag::new().with("points", 30.0).with("assists", 4.0),
                ..game(1, 34, 0.0)
            },
            GameLogEntry {
                stats: StatBag::new().with("points", 28.0).with("assists", 5.0),
                ..game(2, 34, 0.0)
            },
        ];
        let baseline = StatBag::new().with("points", 20.0).with("assists", 5.0);
        let metrics = vec!["points".to_string(), "assists".to_string(), "steals".to_string()];

        let result = detect_surge(&window, &baseline, &metrics, &SurgeConfig::default());

        assert!(result.surge);
        assert_eq!(result.surging_metrics, 1);
        assert_eq!(result.metrics, vec!["points".to_string()]);
    }

    #[test]
    fn test_surge_requires_min_metrics() {
        let window = vec![game(1, 30, 30.0)];
        let baseline = StatBag::new().with("points", 20.0);
        let config = SurgeConfig {
            min_surging_metrics: 2,
            ..SurgeConfig::default()
        };
        let result = detect_surge(&window, &baseline, &["points".to_string()], &config);
        assert!(!result.surge);
        assert_eq!(result.surging_metrics, 1);
    }

    #[test]
    fn test_sum_aggregation_against_scaled_baseline() {
        let season: Vec<_> = (1..=10).map(|r| game(r, 30, 10.0)).collect();
        let window = vec![game(11, 30, 15.0), game(12, 30, 12.0)];
        let metrics = vec!["points".to_string()];

        let baseline = season_baseline(&season, &metrics, Aggregation::Sum, window.len());
        assert_eq!(baseline.get("points"), 20.0);

        let config = SurgeConfig {
            aggregation: Aggregation::Sum,
            ..SurgeConfig::default()
        };
        // 27 > 20 * 1.2
        assert!(detect_surge(&window, &baseline, &metrics, &config).surge);
    }

    #[test]
    fn test_empty_window_never_surges() {
        let result = detect_surge(&[], &StatBag::new(), &["points".to_string()], &SurgeConfig::default());
        assert!(!result.surge);
        assert_eq!(result.surging_metrics, 0);
    }

    #[test]
    fn test_window_per90() {
        let window = vec![game(1, 45, 1.0), game(2, 45, 1.0)];
        assert_eq!(window_per90(&window, "points"), 2.0);
        assert_eq!(window_per90(&[game(1, 0, 3.0)], "points"), 0.0);
        let rates = window_rates(&window, &["points".to_string()]);
        assert_eq!(rates.get("points"), Some(&2.0));
    }

    #[test]
    fn test_default_metrics_per_sport() {
        let config = SurgeConfig::default();
        assert!(config.metrics_for(Sport::Basketball).contains(&"rebounds".to_string()));
        let custom = SurgeConfig {
            metrics: vec!["xg".to_string()],
            ..SurgeConfig::default()
        };
        assert_eq!(custom.metrics_for(Sport::Soccer), vec!["xg".to_string()]);
    }
}
