//! Command handlers for the fantasy-scout CLI.
//!
//! Each handler has a pure half that returns rows (used by tests) and a
//! `handle_*` half that prints them as text lines or JSON.

pub mod alternatives;
pub mod captains;
pub mod differentials;
pub mod flags;
pub mod schedule;
pub mod validate_config;

use crate::{
    config::EngineConfig,
    core::{cache::try_read_to_string, RecommendationCache, RecommendationKey},
    error::Result,
    model::{GameLogEntry, ScoreResult, Snapshot},
    provider::fpl::{parse_element_history, snapshot_from_fpl},
};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::{hash_map::DefaultHasher, BTreeMap};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Game-log fetches in flight at once.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 6;

/// Snapshot file layouts the CLI can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SnapshotFormat {
    /// Canonical snapshot JSON.
    #[default]
    Canonical,
    /// FPL `bootstrap-static` JSON.
    Fpl,
}

/// Where a command reads its snapshot from.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    pub path: PathBuf,
    pub format: SnapshotFormat,
    /// FPL `fixtures` JSON, only read with [`SnapshotFormat::Fpl`].
    pub fixtures: Option<PathBuf>,
    /// Directory of FPL `element-summary` payloads named `{player id}.json`,
    /// only read with [`SnapshotFormat::Fpl`].
    pub history: Option<PathBuf>,
}

impl SnapshotSource {
    pub fn canonical(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: SnapshotFormat::Canonical,
            fixtures: None,
            history: None,
        }
    }
}

/// Snapshot id for payloads that carry none: file stem plus a content hash,
/// so a re-polled file never serves results cached for its previous contents.
fn derived_snapshot_id(path: &Path, contents: &[&str]) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let mut hasher = DefaultHasher::new();
    for part in contents {
        part.hash(&mut hasher);
    }
    format!("{}-{:016x}", stem, hasher.finish())
}

/// Game logs from `{dir}/{player id}.json` element summaries.
///
/// Players without a file have no log; unreadable payloads are skipped.
/// Returns the logs and the raw payloads that were used.
fn load_fpl_history(dir: &Path, snapshot: &Snapshot) -> (Vec<GameLogEntry>, Vec<String>) {
    let mut logs = Vec::new();
    let mut payloads = Vec::new();
    for player in &snapshot.players {
        let path = dir.join(format!("{}.json", player.id));
        let Some(json) = try_read_to_string(&path) else {
            continue;
        };
        match parse_element_history(player.id, &json) {
            Ok(log) => {
                logs.extend(log);
                payloads.push(json);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "skipping element summary"),
        }
    }
    debug!(players = payloads.len(), entries = logs.len(), "loaded FPL history");
    (logs, payloads)
}

/// Read and validate a snapshot.
pub fn load_snapshot(source: &SnapshotSource) -> Result<Snapshot> {
    let text = std::fs::read_to_string(&source.path)?;
    let snapshot = match source.format {
        SnapshotFormat::Canonical => {
            let mut snapshot = Snapshot::from_json_str(&text)?;
            if snapshot.snapshot_id.is_empty() {
                snapshot.snapshot_id = derived_snapshot_id(&source.path, &[text.as_str()]);
            }
            snapshot
        }
        SnapshotFormat::Fpl => {
            let fixtures = match &source.fixtures {
                Some(path) => Some(std::fs::read_to_string(path)?),
                None => None,
            };
            let mut snapshot = snapshot_from_fpl("", &text, fixtures.as_deref())?;
            let (logs, payloads) = match &source.history {
                Some(dir) => load_fpl_history(dir, &snapshot),
                None => (Vec::new(), Vec::new()),
            };
            snapshot.game_logs = logs;

            let mut id_parts = vec![text.as_str()];
            id_parts.extend(fixtures.as_deref());
            id_parts.extend(payloads.iter().map(String::as_str));
            snapshot.snapshot_id = derived_snapshot_id(&source.path, &id_parts);
            snapshot.validate()?;
            snapshot
        }
    };
    info!(
        snapshot = %snapshot.snapshot_id,
        sport = %snapshot.sport,
        players = snapshot.players.len(),
        game_logs = snapshot.game_logs.len(),
        fixtures = snapshot.fixtures.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Resources every recommendation command needs.
pub struct CommandContext {
    pub snapshot: Snapshot,
    pub config: EngineConfig,
    pub cache: Box<dyn RecommendationCache>,
    config_id: String,
}

impl CommandContext {
    pub fn new(snapshot: Snapshot, config: EngineConfig, cache: Box<dyn RecommendationCache>) -> Result<Self> {
        let config_id = config.fingerprint()?;
        Ok(Self {
            snapshot,
            config,
            cache,
            config_id,
        })
    }

    pub fn load(source: &SnapshotSource, config: EngineConfig, cache: Box<dyn RecommendationCache>) -> Result<Self> {
        Self::new(load_snapshot(source)?, config, cache)
    }

    /// Serve a ranking from the cache, computing and storing it on a miss.
    ///
    /// Entries are keyed by snapshot, config fingerprint, `command` and `params`.
    pub fn cached_ranking(
        &self,
        command: &str,
        params: String,
        compute: impl FnOnce() -> Result<Vec<ScoreResult>>,
    ) -> Result<Vec<ScoreResult>> {
        let key = RecommendationKey::new(self.snapshot.snapshot_id.clone(), self.config_id.clone(), command, params);
        if let Some(hit) = self.cache.get(&key) {
            debug!(command, "recommendation cache hit");
            return Ok(hit);
        }
        let ranked = compute()?;
        self.cache.set(key, ranked.clone());
        Ok(ranked)
    }
}

/// Print rows as pretty JSON, or one text line per row.
pub fn print_rows<T: Serialize>(rows: &[T], as_json: bool, line: impl Fn(&T) -> String) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(rows)?); // tarpaulin::skip
    } else if rows.is_empty() {
        println!("No results."); // tarpaulin::skip
    } else {
        for row in rows {
            println!("{}", line(row)); // tarpaulin::skip
        }
    }
    Ok(())
}

/// Compact `name=value` rendering of a breakdown for text output.
pub fn format_breakdown(breakdown: &BTreeMap<String, f64>) -> String {
    breakdown
        .iter()
        .map(|(name, value)| format!("{}={:.2}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}
