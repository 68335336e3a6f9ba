//! Canonical data model every provider adapter produces.

pub mod fixture;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod stats;

pub use fixture::{fixtures_for_team, FixtureRecord, FixtureSide, TeamRecord};
pub use player::{recent_window, GameLogEntry, PlayerRecord};
pub use score::{by_score_desc, NormalizedFeature, NormalizedVector, ScoreResult};
pub use snapshot::Snapshot;
pub use stats::{lenient_f64, StatBag};
