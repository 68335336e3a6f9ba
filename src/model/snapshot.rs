//! One provider poll, in canonical form.

use super::{FixtureRecord, GameLogEntry, PlayerRecord, TeamRecord};
use crate::cli::types::{PlayerId, Round, Sport, TeamId};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the engine reads for one refresh.
///
/// A new refresh produces a new snapshot with a new `snapshot_id`; records
/// inside are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub sport: Sport,
    #[serde(default)]
    pub snapshot_id: String,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub game_logs: Vec<GameLogEntry>,
    #[serde(default)]
    pub fixtures: Vec<FixtureRecord>,
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

impl Snapshot {
    pub fn new(sport: Sport, snapshot_id: impl Into<String>) -> Self {
        Self {
            sport,
            snapshot_id: snapshot_id.into(),
            players: Vec::new(),
            game_logs: Vec::new(),
            fixtures: Vec::new(),
            teams: Vec::new(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(s)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Every player must play a position of the snapshot's sport.
    pub fn validate(&self) -> Result<()> {
        for player in &self.players {
            if player.position.sport() != self.sport {
                return Err(EngineError::InvalidPosition {
                    position: format!("{} (player {} in a {} snapshot)", player.position, player.id, self.sport),
                });
            }
        }
        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerRecord> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PlayerNotFound { id: id.to_string() })
    }

    pub fn team(&self, id: TeamId) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// A team is known if it has a record or appears in any fixture.
    pub fn require_team(&self, id: TeamId) -> Result<()> {
        if self.team(id).is_some() || self.fixtures.iter().any(|f| f.involves(id)) {
            Ok(())
        } else {
            Err(EngineError::TeamNotFound { id: id.to_string() })
        }
    }

    /// `player`'s game log, oldest first.
    pub fn game_log(&self, player: PlayerId) -> Vec<GameLogEntry> {
        let mut log: Vec<GameLogEntry> = self
            .game_logs
            .iter()
            .filter(|g| g.player_id == player)
            .cloned()
            .collect();
        log.sort_by_key(|g| g.round_index);
        log
    }

    /// The latest round with a completed game, if any.
    pub fn latest_round(&self) -> Option<Round> {
        self.game_logs.iter().map(|g| g.round_index).max()
    }

    /// First round not yet covered by game logs, else the first scheduled round.
    pub fn next_round(&self) -> Round {
        match self.latest_round() {
            Some(round) => round.offset(1),
            None => self
                .fixtures
                .iter()
                .map(|f| f.round_index)
                .min()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "sport": "basketball",
        "snapshotId": "2024-01-15T12:00",
        "players": [
            {"id": 1, "name": "Guard", "teamId": 10, "position": "PG", "ownershipPct": 12.5,
             "price": 9000, "status": "active", "minutesPlayed": 1200,
             "seasonStats": {"points": 540, "assists": "210", "turnovers": null}},
            {"id": 2, "name": "Big", "teamId": 10, "position": "C", "status": "out"}
        ],
        "gameLogs": [
            {"playerId": 1, "roundIndex": 3, "minutesPlayed": 34, "stats": {"points": 28}},
            {"playerId": 1, "roundIndex": 1, "minutesPlayed": 30, "stats": {"points": 18}}
        ],
        "fixtures": [
            {"roundIndex": 4, "homeTeamId": 10, "awayTeamId": 20, "homeDifficultyRank": 18, "awayDifficultyRank": 9}
        ]
    }"#;

    #[test]
    fn test_parse_canonical_snapshot() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(snapshot.sport, Sport::Basketball);
        assert_eq!(snapshot.players.len(), 2);

        let guard = snapshot.player(PlayerId::new(1)).unwrap();
        assert_eq!(guard.stat("assists"), 210.0);
        assert!(!guard.season_stats.contains("turnovers"));

        let big = snapshot.player(PlayerId::new(2)).unwrap();
        assert!(big.season_stats.is_empty());
        assert_eq!(big.minutes_played, 0);
    }

    #[test]
    fn test_game_log_sorted_oldest_first() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
        let log = snapshot.game_log(PlayerId::new(1));
        assert_eq!(log[0].round_index, Round::new(1));
        assert_eq!(log[1].round_index, Round::new(3));
        assert!(snapshot.game_log(PlayerId::new(2)).is_empty());
    }

    #[test]
    fn test_next_round() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(snapshot.latest_round(), Some(Round::new(3)));
        assert_eq!(snapshot.next_round(), Round::new(4));

        let mut empty = Snapshot::new(Sport::Basketball, "x");
        assert_eq!(empty.next_round(), Round::default());
        empty.fixtures = snapshot.fixtures.clone();
        assert_eq!(empty.next_round(), Round::new(4));
    }

    #[test]
    fn test_lookup_errors() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
        assert!(matches!(
            snapshot.player(PlayerId::new(99)),
            Err(EngineError::PlayerNotFound { .. })
        ));
        assert!(snapshot.require_team(TeamId::new(20)).is_ok());
        assert!(matches!(
            snapshot.require_team(TeamId::new(30)),
            Err(EngineError::TeamNotFound { .. })
        ));
    }

    #[test]
    fn test_wrong_sport_position_rejected() {
        let json = r#"{"sport": "soccer", "players": [{"id": 1, "name": "X", "teamId": 1, "position": "PG"}]}"#;
        assert!(matches!(
            Snapshot::from_json_str(json),
            Err(EngineError::InvalidPosition { .. })
        ));
    }
}
