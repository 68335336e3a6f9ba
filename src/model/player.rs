//! Canonical player and game-log records.

use super::stats::StatBag;
use crate::cli::types::{AvailabilityStatus, PlayerId, Position, Round, TeamId};
use serde::{Deserialize, Serialize};

/// One player's snapshot as of the latest provider poll.
///
/// Snapshots are replaced wholesale on every refresh; nothing in the engine
/// patches individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    #[serde(alias = "team")]
    pub team_id: TeamId,
    pub position: Position,
    /// Share of fantasy managers rostering the player, 0..=100.
    #[serde(default, alias = "selectedByPercent", alias = "ownership")]
    pub ownership_pct: f64,
    /// Provider-native minor units (FPL tenths of a million, salary dollars).
    #[serde(default, alias = "nowCost")]
    pub price: i64,
    #[serde(default)]
    pub status: AvailabilityStatus,
    #[serde(default, alias = "minutes")]
    pub minutes_played: u32,
    #[serde(default, alias = "stats")]
    pub season_stats: StatBag,
    /// Provider projection for the next fixture, when one is published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_points: Option<f64>,
}

impl PlayerRecord {
    /// Season value of `metric`, `0.0` when the provider omitted it.
    pub fn stat(&self, metric: &str) -> f64 {
        self.season_stats.get(metric)
    }

    /// Price in display units for the player's sport.
    pub fn display_price(&self) -> f64 {
        self.price as f64 / self.position.sport().price_scale()
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

/// One completed fixture for one player. Historical fact, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogEntry {
    pub player_id: PlayerId,
    #[serde(alias = "round")]
    pub round_index: Round,
    #[serde(default, alias = "minutes")]
    pub minutes_played: u32,
    #[serde(default)]
    pub stats: StatBag,
}

impl GameLogEntry {
    pub fn stat(&self, metric: &str) -> f64 {
        self.stats.get(metric)
    }

    pub fn played(&self) -> bool {
        self.minutes_played > 0
    }
}

/// The last `k` entries of an oldest-first game log.
///
/// Returns the whole log when it holds fewer than `k` entries.
pub fn recent_window(log: &[GameLogEntry], k: usize) -> &[GameLogEntry] {
    &log[log.len().saturating_sub(k)..]
}
