//! Provider adapters and the stats collaborator the engine calls out to.
//!
//! Adapters turn provider payloads into the canonical model; nothing past
//! this layer knows which provider a record came from.

pub mod fanout;
pub mod fpl;
pub mod snapshot;

pub use fanout::{fetch_game_logs, FanoutResult};
pub use snapshot::SnapshotProvider;

use crate::cli::types::PlayerId;
use crate::error::Result;
use crate::model::{GameLogEntry, StatBag};

/// Per-player stats lookups that may fail upstream.
///
/// Callers treat an `Err` as "drop this candidate", never as fatal.
pub trait StatsProvider: Send + Sync {
    fn season_stats(&self, player: PlayerId) -> Result<StatBag>;

    /// Oldest-first game log.
    fn game_log(&self, player: PlayerId) -> Result<Vec<GameLogEntry>>;
}
