//! `StatsProvider` backed by an in-memory snapshot.

use super::StatsProvider;
use crate::cli::types::PlayerId;
use crate::error::{EngineError, Result};
use crate::model::{GameLogEntry, Snapshot, StatBag};
use std::collections::HashMap;

/// Serves stats straight out of a loaded snapshot.
pub struct SnapshotProvider<'a> {
    snapshot: &'a Snapshot,
    logs: HashMap<PlayerId, Vec<GameLogEntry>>,
}

impl<'a> SnapshotProvider<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut logs: HashMap<PlayerId, Vec<GameLogEntry>> = HashMap::new();
        for entry in &snapshot.game_logs {
            logs.entry(entry.player_id).or_default().push(entry.clone());
        }
        for log in logs.values_mut() {
            log.sort_by_key(|g| g.round_index);
        }
        Self { snapshot, logs }
    }
}

impl StatsProvider for SnapshotProvider<'_> {
    fn season_stats(&self, player: PlayerId) -> Result<StatBag> {
        self.snapshot
            .player(player)
            .map(|p| p.season_stats.clone())
            .map_err(|e| EngineError::Fetch {
                player_id: player.to_string(),
                message: e.to_string(),
            })
    }

    fn game_log(&self, player: PlayerId) -> Result<Vec<GameLogEntry>> {
        Ok(self.logs.get(&player).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{AvailabilityStatus, Position, Round, Sport, TeamId};
    use crate::model::PlayerRecord;

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new(Sport::Basketball, "s1");
        snapshot.players.push(PlayerRecord {
            id: PlayerId::new(7),
            name: "Seven".to_string(),
            team_id: TeamId::new(1),
            position: Position::SG,
            ownership_pct: 3.0,
            price: 5000,
            status: AvailabilityStatus::Active,
            minutes_played: 600,
            season_stats: StatBag::new().with("points", 300.0),
            projected_points: None,
        });
        for round in [4, 2, 3] {
            snapshot.game_logs.push(GameLogEntry {
                player_id: PlayerId::new(7),
                round_index: Round::new(round),
                minutes_played: 30,
                stats: StatBag::new(),
            });
        }
        snapshot
    }

    #[test]
    fn test_season_stats_and_sorted_log() {
        let snapshot = snapshot();
        let provider = SnapshotProvider::new(&snapshot);

        assert_eq!(provider.season_stats(PlayerId::new(7)).unwrap().get("points"), 300.0);

        let rounds: Vec<u16> = provider
            .game_log(PlayerId::new(7))
            .unwrap()
            .iter()
            .map(|g| g.round_index.as_u16())
            .collect();
        assert_eq!(rounds, vec![2, 3, 4]);
    }

    #[test]
    fn test_unknown_player_is_fetch_failure() {
        let snapshot = snapshot();
        let provider = SnapshotProvider::new(&snapshot);
        assert!(matches!(
            provider.season_stats(PlayerId::new(8)),
            Err(EngineError::Fetch { .. })
        ));
        assert!(provider.game_log(PlayerId::new(8)).unwrap().is_empty());
    }
}
