//! Derived, per-request outputs: feature vectors and scores.

use crate::cli::types::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One weighted feature of a player under a position profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFeature {
    pub name: String,
    pub weight: f64,
    /// Pool-scaled value, usually in `0.0..=1.0`.
    pub value: f64,
}

impl NormalizedFeature {
    pub fn weighted(&self) -> f64 {
        self.weight * self.value
    }
}

/// Ordered feature vector for one player, rebuilt for every comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVector {
    pub player_id: PlayerId,
    pub position: Position,
    pub features: Vec<NormalizedFeature>,
}

impl NormalizedVector {
    pub fn magnitude(&self) -> f64 {
        self.features
            .iter()
            .map(|f| f.weighted().powi(2))
            .sum::<f64>()
            .sqrt()
    }

    pub fn weight_sum(&self) -> f64 {
        self.features.iter().map(|f| f.weight).sum()
    }
}

/// A scored player with an attributable breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub player_id: PlayerId,
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
}

impl ScoreResult {
    pub fn new(player_id: PlayerId, score: f64) -> Self {
        Self {
            player_id,
            score,
            breakdown: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, name: impl Into<String>, value: f64) -> Self {
        self.breakdown.insert(name.into(), value);
        self
    }

    pub fn component(&self, name: &str) -> Option<f64> {
        self.breakdown.get(name).copied()
    }
}

/// Descending by score, ascending player id on ties.
pub fn by_score_desc(a: &ScoreResult, b: &ScoreResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.player_id.cmp(&b.player_id))
}
