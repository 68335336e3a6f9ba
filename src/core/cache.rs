//! Caller-owned recommendation cache.
//!
//! Two tiers:
//! - memory: an LRU of recent results
//! - disk (optional): JSON files under a cache directory
//!
//! Every key carries the snapshot id and config fingerprint it was computed
//! from. Disk entries live under one directory per snapshot. Seeing a new
//! snapshot id, in this process or on disk, clears the whole cache; entries
//! are never patched.

use crate::model::ScoreResult;
use lru::LruCache;
use std::{
    fs,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, warn};

/// Path: ~/.cache/fantasy-scout
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("fantasy-scout")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();
    f.read_to_string(&mut s).ok()?;
    Some(s)
}

/// Write a string to file, creating parent directories
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

fn path_safe(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}

/// Identifies one ranked result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecommendationKey {
    pub snapshot_id: String,
    /// [`EngineConfig::fingerprint`](crate::config::EngineConfig::fingerprint) of the scoring config.
    pub config_id: String,
    /// Which ranking produced the results, e.g. `alternatives`.
    pub command: String,
    /// Canonical rendering of the request parameters.
    pub params: String,
}

impl RecommendationKey {
    pub fn new(
        snapshot_id: impl Into<String>,
        config_id: impl Into<String>,
        command: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            config_id: config_id.into(),
            command: command.into(),
            params: params.into(),
        }
    }

    /// File-system safe name for the disk tier, unique within one snapshot.
    pub fn to_file_key(&self) -> String {
        path_safe(&format!("{}_{}_{}", self.command, self.config_id, self.params))
    }
}

pub trait RecommendationCache: Send + Sync {
    fn get(&self, key: &RecommendationKey) -> Option<Vec<ScoreResult>>;
    fn set(&self, key: RecommendationKey, value: Vec<ScoreResult>);
    fn invalidate_all(&self);
}

struct Inner {
    memory: LruCache<RecommendationKey, Vec<ScoreResult>>,
    snapshot_id: Option<String>,
}

/// LRU-backed [`RecommendationCache`] with an optional disk tier.
pub struct LruRecommendationCache {
    inner: Mutex<Inner>,
    capacity: usize,
    disk_dir: Option<PathBuf>,
}

impl LruRecommendationCache {
    /// Memory-only cache holding up to `capacity` result sets.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                memory: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
                snapshot_id: None,
            }),
            capacity,
            disk_dir: None,
        }
    }

    /// Also persist entries as JSON under `dir`.
    pub fn with_disk(capacity: usize, dir: impl Into<PathBuf>) -> Self {
        Self {
            disk_dir: Some(dir.into()),
            ..Self::new(capacity)
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_dir(&self, snapshot_id: &str) -> Option<PathBuf> {
        self.disk_dir.as_ref().map(|dir| dir.join(path_safe(snapshot_id)))
    }

    fn file_path(&self, key: &RecommendationKey) -> Option<PathBuf> {
        self.snapshot_dir(&key.snapshot_id)
            .map(|dir| dir.join(format!("{}.json", key.to_file_key())))
    }

    /// Clears everything when `snapshot_id` differs from the last one seen.
    ///
    /// The first call in a process also drops disk entries left behind by
    /// other snapshots.
    fn observe_snapshot(&self, inner: &mut Inner, snapshot_id: &str) {
        if inner.snapshot_id.as_deref() == Some(snapshot_id) {
            return;
        }
        if inner.snapshot_id.is_some() {
            debug!(snapshot = snapshot_id, "new snapshot, clearing recommendation cache");
            inner.memory.clear();
        }
        let keep = self.snapshot_dir(snapshot_id);
        self.clear_disk(keep.as_deref());
        inner.snapshot_id = Some(snapshot_id.to_string());
    }

    /// Remove every snapshot directory under the cache dir except `keep`.
    fn clear_disk(&self, keep: Option<&Path>) {
        let Some(dir) = &self.disk_dir else {
            return;
        };
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if keep == Some(path.as_path()) {
                continue;
            }
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)
            } else {
                continue;
            };
            match removed {
                Ok(()) => debug!(path = %path.display(), "removed stale cache entry"),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove cache entry"),
            }
        }
    }

    /// (entries in memory, capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.lock().memory.len(), self.capacity)
    }
}

impl RecommendationCache for LruRecommendationCache {
    fn get(&self, key: &RecommendationKey) -> Option<Vec<ScoreResult>> {
        let mut inner = self.lock();
        self.observe_snapshot(&mut inner, &key.snapshot_id);

        if let Some(value) = inner.memory.get(key) {
            return Some(value.clone());
        }

        let path = self.file_path(key)?;
        let value: Vec<ScoreResult> = serde_json::from_str(&try_read_to_string(&path)?).ok()?;
        inner.memory.put(key.clone(), value.clone());
        Some(value)
    }

    fn set(&self, key: RecommendationKey, value: Vec<ScoreResult>) {
        let mut inner = self.lock();
        self.observe_snapshot(&mut inner, &key.snapshot_id);

        if let Some(path) = self.file_path(&key) {
            let written = serde_json::to_string(&value)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                .and_then(|content| write_string(&path, &content));
            if let Err(e) = written {
                warn!(path = %path.display(), error = %e, "failed to persist cache entry");
            }
        }
        inner.memory.put(key, value);
    }

    fn invalidate_all(&self) {
        let mut inner = self.lock();
        inner.memory.clear();
        inner.snapshot_id = None;
        self.clear_disk(None);
    }
}
