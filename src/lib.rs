//! Fantasy Scout Library
//!
//! Statistical normalization and recommendation engine for fantasy sports
//! snapshots (soccer, basketball and American football).
//!
//! ## Features
//!
//! - **Feature Normalization**: Per-90 rates scaled against a candidate pool
//! - **Cheaper Alternatives**: Cosine similarity over position-specific weight profiles
//! - **Form Flags**: Short-window trend, surge and teammate-absence opportunity detection
//! - **Differentials**: Projected output against ownership, with comeback and debut uplifts
//! - **Captaincy**: Fixed-weight composite summed across double rounds
//! - **Fixture Difficulty**: Five-band mapping over FDR (1..=5) and rank (1..=32) scales
//!
//! ## Quick Start
//!
//! ```rust
//! use fantasy_scout::engine::differential::{score_differential, DifferentialCategory, DifferentialConfig, DifferentialInput};
//! use fantasy_scout::PlayerId;
//!
//! let input = DifferentialInput {
//!     player_id: PlayerId::new(7),
//!     ownership_pct: 0.05,
//!     projected_points: 6.0,
//!     category: DifferentialCategory::Comeback,
//! };
//! let result = score_differential(&input, &DifferentialConfig::default());
//! assert!((result.score - 2720.0).abs() < 1e-9);
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a tuned engine config without passing `--config`:
//! ```bash
//! export FANTASY_SCOUT_CONFIG=~/scout.toml
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;

// Re-export commonly used types
pub use cli::types::{AvailabilityStatus, PlayerId, Position, PositionGroup, Round, Sport, TeamId};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use model::{FixtureRecord, GameLogEntry, PlayerRecord, ScoreResult, Snapshot, StatBag, TeamRecord};

pub const CONFIG_ENV_VAR: &str = "FANTASY_SCOUT_CONFIG";
