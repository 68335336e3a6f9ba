//! Bounded parallel fetches against a [`StatsProvider`].

use super::StatsProvider;
use crate::cli::types::PlayerId;
use crate::error::{EngineError, Result};
use crate::model::GameLogEntry;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Logs that arrived, plus the candidates dropped on fetch failure.
#[derive(Debug, Default)]
pub struct FanoutResult {
    pub logs: BTreeMap<PlayerId, Vec<GameLogEntry>>,
    pub dropped: Vec<PlayerId>,
}

impl FanoutResult {
    pub fn log(&self, player: PlayerId) -> Option<&[GameLogEntry]> {
        self.logs.get(&player).map(Vec::as_slice)
    }
}

fn with_fetch_pool<T>(max_concurrency: usize, action: impl FnOnce() -> T + Send) -> Result<T>
where
    T: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_concurrency.max(1))
        .build()
        .map_err(|e| EngineError::InvalidConfig {
            message: format!("fetch pool: {}", e),
        })?;
    Ok(pool.install(action))
}

/// Fetch game logs for `ids` with at most `max_concurrency` in flight.
///
/// A failed fetch drops that candidate from the batch and is logged; it never
/// fails the whole batch.
pub fn fetch_game_logs(provider: &dyn StatsProvider, ids: &[PlayerId], max_concurrency: usize) -> Result<FanoutResult> {
    let fetched: Vec<(PlayerId, Result<Vec<GameLogEntry>>)> = with_fetch_pool(max_concurrency, || {
        ids.par_iter().map(|&id| (id, provider.game_log(id))).collect()
    })?;

    let mut result = FanoutResult::default();
    for (id, outcome) in fetched {
        match outcome {
            Ok(log) => {
                result.logs.insert(id, log);
            }
            Err(e) => {
                warn!(player = %id, error = %e, "dropping candidate after failed fetch");
                result.dropped.push(id);
            }
        }
    }
    debug!(
        fetched = result.logs.len(),
        dropped = result.dropped.len(),
        "game log fan-out complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Round;
    use crate::model::StatBag;

    struct FlakyStats;

    impl StatsProvider for FlakyStats {
        fn season_stats(&self, player: PlayerId) -> Result<StatBag> {
            Err(EngineError::Fetch {
                player_id: player.to_string(),
                message: "unused".to_string(),
            })
        }

        fn game_log(&self, player: PlayerId) -> Result<Vec<GameLogEntry>> {
            if player.as_u64() % 2 == 0 {
                return Err(EngineError::Fetch {
                    player_id: player.to_string(),
                    message: "timeout".to_string(),
                });
            }
            Ok(vec![GameLogEntry {
                player_id: player,
                round_index: Round::new(1),
                minutes_played: 90,
                stats: StatBag::new(),
            }])
        }
    }

    #[test]
    fn test_failures_drop_candidates() {
        let ids: Vec<PlayerId> = (1..=6).map(PlayerId::new).collect();
        let result = fetch_game_logs(&FlakyStats, &ids, 2).unwrap();

        assert_eq!(result.logs.len(), 3);
        assert_eq!(result.dropped.len(), 3);
        assert!(result.log(PlayerId::new(1)).is_some());
        assert!(result.log(PlayerId::new(2)).is_none());
        assert!(result.dropped.contains(&PlayerId::new(4)));
    }

    #[test]
    fn test_zero_concurrency_still_runs() {
        let result = fetch_game_logs(&FlakyStats, &[PlayerId::new(3)], 0).unwrap();
        assert_eq!(result.logs.len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let result = fetch_game_logs(&FlakyStats, &[], 4).unwrap();
        assert!(result.logs.is_empty());
        assert!(result.dropped.is_empty());
    }
}
