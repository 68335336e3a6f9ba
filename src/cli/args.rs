//! CLI argument definitions and parsing structures.

use super::types::{PlayerId, Position, Round, TeamId};
use crate::commands::{SnapshotFormat, SnapshotSource};
use crate::engine::{fixture_difficulty::RankScale, trend::Aggregation};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Snapshot input and output format shared by every scoring command
#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Snapshot file to score.
    #[clap(long, short = 's')]
    pub snapshot: PathBuf,

    /// Layout of the snapshot file.
    #[clap(long, value_enum, default_value_t = SnapshotFormat::Canonical)]
    pub format: SnapshotFormat,

    /// FPL fixtures JSON (only with `--format fpl`).
    #[clap(long)]
    pub fixtures: Option<PathBuf>,

    /// Directory of FPL element-summary JSON files named `<player id>.json`
    /// (only with `--format fpl`).
    #[clap(long)]
    pub history: Option<PathBuf>,

    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,
}

impl SnapshotArgs {
    pub fn source(&self) -> SnapshotSource {
        SnapshotSource {
            path: self.snapshot.clone(),
            format: self.format,
            fixtures: self.fixtures.clone(),
            history: self.history.clone(),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(
    name = "fantasy-scout",
    version,
    about = "Similarity, differential, captaincy and form recommendations from fantasy sports snapshots"
)]
pub struct ScoutCli {
    /// Engine config TOML (or set `FANTASY_SCOUT_CONFIG`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter when `RUST_LOG` is unset, e.g. `info` or `fantasy_scout=debug`.
    #[clap(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines on stderr.
    #[clap(long, global = true)]
    pub json_logs: bool,

    /// Skip the on-disk recommendation cache.
    #[clap(long, global = true)]
    pub no_cache: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cheaper players who produce like the given player.
    Alternatives {
        #[clap(flatten)]
        input: SnapshotArgs,

        /// Target player id.
        #[clap(long, short = 'p')]
        player: PlayerId,

        /// Price ceiling in display units (defaults to the target's price).
        #[clap(long)]
        max_price: Option<f64>,

        /// Minimum season minutes for a candidate.
        #[clap(long)]
        min_minutes: Option<u32>,

        /// Maximum number of results.
        #[clap(long, short = 'l', default_value_t = 10)]
        limit: usize,
    },

    /// Low-owned players with high projected output.
    Differentials {
        #[clap(flatten)]
        input: SnapshotArgs,

        /// Fixtures to project over.
        #[clap(long)]
        horizon: Option<u32>,

        /// Only rank players owned by at most this percentage.
        #[clap(long)]
        max_ownership: Option<f64>,

        /// Restrict to one position.
        #[clap(long)]
        position: Option<Position>,

        /// Maximum number of results.
        #[clap(long, short = 'l', default_value_t = 10)]
        limit: usize,
    },

    /// Captaincy picks for a scoring round.
    Captains {
        #[clap(flatten)]
        input: SnapshotArgs,

        /// Scoring round (defaults to the next round without game logs).
        #[clap(long, short = 'r')]
        round: Option<Round>,

        /// Difficulty scale of the snapshot's fixture ranks.
        #[clap(long, value_enum)]
        scale: Option<RankScale>,

        /// Restrict to one position.
        #[clap(long)]
        position: Option<Position>,

        /// Maximum number of results.
        #[clap(long, short = 'l', default_value_t = 10)]
        limit: usize,
    },

    /// Trend, surge and opportunity flags for one player.
    Flags {
        #[clap(flatten)]
        input: SnapshotArgs,

        /// Player id.
        #[clap(long, short = 'p')]
        player: PlayerId,

        /// Games in the surge window.
        #[clap(long)]
        window: Option<usize>,

        /// How the surge window is aggregated.
        #[clap(long, value_enum)]
        aggregation: Option<Aggregation>,
    },

    /// Fixture difficulty grid for one team.
    Schedule {
        #[clap(flatten)]
        input: SnapshotArgs,

        /// Team id.
        #[clap(long, short = 't')]
        team: TeamId,

        /// First round shown (defaults to the next round without game logs).
        #[clap(long)]
        from: Option<Round>,

        /// Rounds shown.
        #[clap(long, default_value_t = crate::commands::schedule::DEFAULT_HORIZON)]
        horizon: u16,

        /// Difficulty scale of the snapshot's fixture ranks.
        #[clap(long, value_enum)]
        scale: Option<RankScale>,
    },

    /// Validate the engine config and print a summary.
    ValidateConfig {
        /// Print the resolved config as JSON.
        #[clap(long)]
        json: bool,
    },
}
