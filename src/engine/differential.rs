//! Low-ownership, high-projection "differential" scoring.
//!
//! score = (projected * horizon) / max(ownership, floor) * scale, then the
//! category multiplier, then the category's flat bonus. The order of
//! operations is fixed so identical inputs give bit-identical scores.

use crate::cli::types::PlayerId;
use crate::model::{by_score_desc, GameLogEntry, PlayerRecord, ScoreResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifferentialCategory {
    /// Back from an absence inside the recent window.
    Comeback,
    /// No minutes yet this season.
    FreshDebut,
    #[default]
    Normal,
}

impl DifferentialCategory {
    /// Classify from season minutes and the recent window (oldest first).
    pub fn derive(season_minutes: u32, recent: &[GameLogEntry]) -> Self {
        if season_minutes == 0 {
            return DifferentialCategory::FreshDebut;
        }
        match recent.split_last() {
            Some((latest, earlier)) if latest.played() && earlier.iter().any(|g| !g.played()) => {
                DifferentialCategory::Comeback
            }
            _ => DifferentialCategory::Normal,
        }
    }
}

impl fmt::Display for DifferentialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DifferentialCategory::Comeback => "comeback",
            DifferentialCategory::FreshDebut => "fresh-debut",
            DifferentialCategory::Normal => "normal",
        };
        write!(f, "{}", s)
    }
}

/// Empirically tuned constants, kept overridable rather than re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferentialConfig {
    pub horizon_fixtures: u32,
    pub ownership_floor: f64,
    pub scale: f64,
    /// Only players owned by at most this share are ranked.
    pub max_ownership: f64,
    pub comeback_multiplier: f64,
    pub comeback_bonus: f64,
    pub fresh_debut_multiplier: f64,
    pub fresh_debut_bonus: f64,
}

impl Default for DifferentialConfig {
    fn default() -> Self {
        Self {
            horizon_fixtures: 3,
            ownership_floor: 0.1,
            scale: 10.0,
            max_ownership: 10.0,
            comeback_multiplier: 1.5,
            comeback_bonus: 20.0,
            fresh_debut_multiplier: 1.2,
            fresh_debut_bonus: 15.0,
        }
    }
}

impl DifferentialConfig {
    pub fn multiplier(&self, category: DifferentialCategory) -> f64 {
        match category {
            DifferentialCategory::Comeback => self.comeback_multiplier,
            DifferentialCategory::FreshDebut => self.fresh_debut_multiplier,
            DifferentialCategory::Normal => 1.0,
        }
    }

    pub fn bonus(&self, category: DifferentialCategory) -> f64 {
        match category {
            DifferentialCategory::Comeback => self.comeback_bonus,
            DifferentialCategory::FreshDebut => self.fresh_debut_bonus,
            DifferentialCategory::Normal => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialInput {
    pub player_id: PlayerId,
    pub ownership_pct: f64,
    pub projected_points: f64,
    pub category: DifferentialCategory,
}

impl DifferentialInput {
    pub fn from_player(player: &PlayerRecord, projected_points: f64, category: DifferentialCategory) -> Self {
        Self {
            player_id: player.id,
            ownership_pct: player.ownership_pct,
            projected_points,
            category,
        }
    }
}

pub fn base_score(projected_points: f64, ownership_pct: f64, config: &DifferentialConfig) -> f64 {
    (projected_points * config.horizon_fixtures as f64) / ownership_pct.max(config.ownership_floor) * config.scale
}

/// Score one candidate.
///
/// Breakdown: `base`, `categoryUplift` (base times multiplier minus base) and
/// `categoryBonus`; they add up to the score.
pub fn score_differential(input: &DifferentialInput, config: &DifferentialConfig) -> ScoreResult {
    let base = base_score(input.projected_points, input.ownership_pct, config);
    let multiplied = base * config.multiplier(input.category);
    let bonus = config.bonus(input.category);
    let score = multiplied + bonus;

    ScoreResult::new(input.player_id, score)
        .with_component("base", base)
        .with_component("categoryUplift", multiplied - base)
        .with_component("categoryBonus", bonus)
}

/// Score and rank candidates under the ownership ceiling.
///
/// Ties go to the lower-owned player, then the lower id.
pub fn rank_differentials(inputs: &[DifferentialInput], config: &DifferentialConfig) -> Vec<ScoreResult> {
    let mut scored: Vec<(f64, ScoreResult)> = inputs
        .par_iter()
        .filter(|i| i.ownership_pct <= config.max_ownership)
        .map(|i| (i.ownership_pct, score_differential(i, config)))
        .collect();

    scored.sort_by(|(own_a, a), (own_b, b)| match b.score.total_cmp(&a.score) {
        Ordering::Equal => own_a.total_cmp(own_b).then_with(|| by_score_desc(a, b)),
        other => other,
    });
    scored.into_iter().map(|(_, r)| r).collect()
}
