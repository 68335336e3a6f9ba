//! Per-90 rates and pool scaling.
//!
//! Raw season totals are not comparable between a starter and a rotation
//! player, so every feature goes through [`per90`] and is then scaled against
//! the candidate pool's maximum so no single metric dominates a weighted sum.

use super::weights::{FeatureScaling, FeatureWeight};
use crate::model::{PlayerRecord, StatBag};

/// Minutes in a regulation soccer match; the common denominator for rates.
pub const MINUTES_PER_90: f64 = 90.0;

/// `value` scaled to a 90-minute basis. Zero minutes yields `0.0`.
pub fn per90(value: f64, minutes_played: f64) -> f64 {
    if minutes_played <= 0.0 {
        return 0.0;
    }
    value * MINUTES_PER_90 / minutes_played
}

/// Largest value in a pool, or `1.0` when that maximum is zero (or the pool is empty).
///
/// The fallback leaves values unscaled, so all-zero features stay zero.
pub fn pool_max(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

pub fn scale_to_pool_max(value: f64, pool_max: f64) -> f64 {
    if pool_max == 0.0 {
        return value;
    }
    value / pool_max
}

/// A single feature of a stat bag under the given scaling.
pub fn feature_value(stats: &StatBag, minutes_played: u32, feature: &FeatureWeight) -> f64 {
    let raw = stats.get(&feature.metric);
    match feature.scaling {
        FeatureScaling::Per90 => per90(raw, minutes_played as f64),
        FeatureScaling::Raw => raw,
    }
}

/// Unscaled feature values for a player, in profile order.
pub fn raw_features(player: &PlayerRecord, profile: &[FeatureWeight]) -> Vec<f64> {
    profile
        .iter()
        .map(|f| feature_value(&player.season_stats, player.minutes_played, f))
        .collect()
}
