//! Fixtures and team strength records.

use crate::cli::types::{Round, TeamId};
use serde::{Deserialize, Serialize};

/// A scheduled game between two teams.
///
/// Each side carries the difficulty rank *that side faces*, on the provider's
/// own scale. Re-issued schedules replace fixtures; they are never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRecord {
    #[serde(alias = "round")]
    pub round_index: Round,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_difficulty_rank: i32,
    pub away_difficulty_rank: i32,
}

/// A fixture seen from one team's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureSide {
    pub round_index: Round,
    pub opponent: TeamId,
    pub is_home: bool,
    pub difficulty_rank: i32,
}

impl FixtureRecord {
    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team_id == team || self.away_team_id == team
    }

    /// This fixture from `team`'s perspective, if it plays in it.
    pub fn side_for(&self, team: TeamId) -> Option<FixtureSide> {
        if self.home_team_id == team {
            Some(FixtureSide {
                round_index: self.round_index,
                opponent: self.away_team_id,
                is_home: true,
                difficulty_rank: self.home_difficulty_rank,
            })
        } else if self.away_team_id == team {
            Some(FixtureSide {
                round_index: self.round_index,
                opponent: self.home_team_id,
                is_home: false,
                difficulty_rank: self.away_difficulty_rank,
            })
        } else {
            None
        }
    }
}

/// All of `team`'s fixtures in `round`, in schedule order. Empty for a blank round.
pub fn fixtures_for_team(fixtures: &[FixtureRecord], team: TeamId, round: Round) -> Vec<FixtureSide> {
    fixtures
        .iter()
        .filter(|f| f.round_index == round)
        .filter_map(|f| f.side_for(team))
        .collect()
}

/// Team-level ratings used for opponent strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    /// Defensive strength when this team plays at home (FPL scale ~1000..1400).
    #[serde(default)]
    pub strength_defence_home: Option<f64>,
    #[serde(default)]
    pub strength_defence_away: Option<f64>,
}

impl TeamRecord {
    /// Defensive rating for the venue this team plays at.
    pub fn defensive_strength(&self, playing_at_home: bool) -> Option<f64> {
        if playing_at_home {
            self.strength_defence_home
        } else {
            self.strength_defence_away
        }
    }

    pub fn label(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(round: u16, home: u32, away: u32) -> FixtureRecord {
        FixtureRecord {
            round_index: Round::new(round),
            home_team_id: TeamId::new(home),
            away_team_id: TeamId::new(away),
            home_difficulty_rank: 2,
            away_difficulty_rank: 4,
        }
    }

    #[test]
    fn test_side_for_home_and_away() {
        let f = fixture(5, 1, 2);

        let home = f.side_for(TeamId::new(1)).unwrap();
        assert!(home.is_home);
        assert_eq!(home.opponent, TeamId::new(2));
        assert_eq!(home.difficulty_rank, 2);

        let away = f.side_for(TeamId::new(2)).unwrap();
        assert!(!away.is_home);
        assert_eq!(away.opponent, TeamId::new(1));
        assert_eq!(away.difficulty_rank, 4);

        assert!(f.side_for(TeamId::new(3)).is_none());
    }

    #[test]
    fn test_fixtures_for_team_double_and_blank() {
        let fixtures = vec![fixture(5, 1, 2), fixture(5, 3, 1), fixture(6, 2, 3)];

        assert_eq!(fixtures_for_team(&fixtures, TeamId::new(1), Round::new(5)).len(), 2);
        assert!(fixtures_for_team(&fixtures, TeamId::new(1), Round::new(6)).is_empty());
    }

    #[test]
    fn test_team_defensive_strength_by_venue() {
        let team = TeamRecord {
            id: TeamId::new(1),
            name: "Arsenal".to_string(),
            short_name: Some("ARS".to_string()),
            strength_defence_home: Some(1350.0),
            strength_defence_away: Some(1300.0),
        };
        assert_eq!(team.defensive_strength(true), Some(1350.0));
        assert_eq!(team.defensive_strength(false), Some(1300.0));
        assert_eq!(team.label(), "ARS");
    }
}
