//! Cheaper-alternative discovery by cosine similarity.
//!
//! Each player becomes a weighted vector of pool-scaled per-90 features under
//! the profile for their position. Candidates are ranked by cosine similarity
//! to the target; ties prefer the bigger saving, then the lower id.

use super::normalize::{pool_max, raw_features, scale_to_pool_max};
use super::weights::{FeatureWeight, WeightTables};
use crate::cli::types::PlayerId;
use crate::error::Result;
use crate::model::{NormalizedFeature, NormalizedVector, PlayerRecord, ScoreResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Caller-supplied candidate filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityQuery {
    /// Candidates below this many season minutes are skipped.
    pub min_minutes: u32,
    /// Price ceiling in minor units; `None` means "no dearer than the target".
    pub max_price: Option<i64>,
}

impl Default for SimilarityQuery {
    fn default() -> Self {
        Self {
            min_minutes: 270,
            max_price: None,
        }
    }
}

/// One ranked alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityMatch {
    pub player_id: PlayerId,
    pub name: String,
    pub similarity: f64,
    /// `target.price - candidate.price`, provider minor units.
    pub price_delta: i64,
    /// Per-feature share of the cosine; sums to `similarity` before clamping.
    pub contributions: BTreeMap<String, f64>,
}

impl SimilarityMatch {
    pub fn to_score_result(&self) -> ScoreResult {
        ScoreResult {
            player_id: self.player_id,
            score: self.similarity,
            breakdown: self.contributions.clone(),
        }
    }
}

/// Feature maxima across a pool, one per profile entry.
pub fn pool_maxima(pool: &[&PlayerRecord], profile: &[FeatureWeight]) -> Vec<f64> {
    let columns: Vec<Vec<f64>> = pool.iter().map(|p| raw_features(p, profile)).collect();
    (0..profile.len())
        .map(|i| {
            let column: Vec<f64> = columns.iter().map(|row| row[i]).collect();
            pool_max(&column)
        })
        .collect()
}

pub fn build_vector(player: &PlayerRecord, profile: &[FeatureWeight], maxima: &[f64]) -> NormalizedVector {
    let features = profile
        .iter()
        .zip(raw_features(player, profile))
        .zip(maxima)
        .map(|((feature, raw), max)| NormalizedFeature {
            name: feature.metric.clone(),
            weight: feature.weight,
            value: scale_to_pool_max(raw, *max),
        })
        .collect();

    NormalizedVector {
        player_id: player.id,
        position: player.position,
        features,
    }
}

fn contributions(a: &NormalizedVector, b: &NormalizedVector) -> Option<Vec<(String, f64)>> {
    let denominator = a.magnitude() * b.magnitude();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(
        a.features
            .iter()
            .zip(&b.features)
            .map(|(fa, fb)| (fa.name.clone(), fa.weighted() * fb.weighted() / denominator))
            .collect(),
    )
}

/// Cosine similarity of two vectors built from the same profile.
///
/// Zero-magnitude input yields exactly `0.0`; the result is clamped to `[-1, 1]`.
pub fn cosine_similarity(a: &NormalizedVector, b: &NormalizedVector) -> f64 {
    match contributions(a, b) {
        Some(parts) => parts.iter().map(|(_, v)| v).sum::<f64>().clamp(-1.0, 1.0),
        None => 0.0,
    }
}

fn match_order(a: &SimilarityMatch, b: &SimilarityMatch) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| b.price_delta.cmp(&a.price_delta))
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Rank same-position candidates by similarity to `target`.
///
/// An empty (or fully filtered) pool returns an empty list. A position with no
/// weight profile is a configuration error.
pub fn find_alternatives(
    target: &PlayerRecord,
    candidates: &[PlayerRecord],
    tables: &WeightTables,
    query: &SimilarityQuery,
) -> Result<Vec<SimilarityMatch>> {
    let profile = tables.profile(target.position)?;
    let ceiling = query.max_price.unwrap_or(target.price);

    let pool: Vec<&PlayerRecord> = candidates
        .iter()
        .filter(|c| c.id != target.id)
        .filter(|c| c.position == target.position)
        .filter(|c| c.minutes_played >= query.min_minutes)
        .filter(|c| c.price <= ceiling)
        .collect();

    debug!(
        target = %target.id,
        position = %target.position,
        pool = pool.len(),
        "building similarity pool"
    );

    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let mut everyone = pool.clone();
    everyone.push(target);
    let maxima = pool_maxima(&everyone, profile);
    let target_vector = build_vector(target, profile, &maxima);

    let mut matches: Vec<SimilarityMatch> = pool
        .par_iter()
        .map(|candidate| {
            let vector = build_vector(candidate, profile, &maxima);
            let parts = contributions(&target_vector, &vector).unwrap_or_default();
            let similarity = parts.iter().map(|(_, v)| v).sum::<f64>().clamp(-1.0, 1.0);
            SimilarityMatch {
                player_id: candidate.id,
                name: candidate.name.clone(),
                similarity,
                price_delta: target.price - candidate.price,
                contributions: parts.into_iter().collect(),
            }
        })
        .collect();

    matches.sort_by(match_order);
    Ok(matches)
}
