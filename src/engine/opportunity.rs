//! Role expansion from unavailable teammates.
//!
//! Best-effort signal only: `opportunity == false` means nothing was
//! detected, never that the roster is healthy.

use crate::cli::types::PlayerId;
use crate::model::{PlayerRecord, StatBag};
use crate::provider::StatsProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityConfig {
    /// Most prominent absences to look up.
    pub max_absences: usize,
    /// Usage above this is a high-usage opportunity.
    pub high_usage_threshold: f64,
    pub usage_positive: Vec<String>,
    pub usage_negative: Vec<String>,
}

impl Default for OpportunityConfig {
    fn default() -> Self {
        Self {
            max_absences: 3,
            high_usage_threshold: 20.0,
            usage_positive: vec!["points".to_string(), "assists".to_string()],
            usage_negative: vec!["turnovers".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub opportunity: bool,
    pub high_usage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teammate: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<f64>,
}

impl Opportunity {
    pub fn none() -> Self {
        Self {
            opportunity: false,
            high_usage: false,
            reason: None,
            teammate: None,
            usage: None,
        }
    }
}

/// `points + assists - turnovers` with the configured metric names.
pub fn usage_proxy(stats: &StatBag, config: &OpportunityConfig) -> f64 {
    let positive: f64 = config.usage_positive.iter().map(|m| stats.get(m)).sum();
    let negative: f64 = config.usage_negative.iter().map(|m| stats.get(m)).sum();
    positive - negative
}

/// Unavailable same-role teammates of `target`, most owned first.
pub fn unavailable_teammates<'a>(target: &PlayerRecord, roster: &'a [PlayerRecord]) -> Vec<&'a PlayerRecord> {
    let mut absent: Vec<&PlayerRecord> = roster
        .iter()
        .filter(|p| p.id != target.id)
        .filter(|p| p.team_id == target.team_id)
        .filter(|p| p.position.shares_role_with(&target.position))
        .filter(|p| !p.is_available())
        .collect();
    absent.sort_by(|a, b| {
        b.ownership_pct
            .total_cmp(&a.ownership_pct)
            .then_with(|| a.id.cmp(&b.id))
    });
    absent
}

/// Look for vacated usage among `target`'s unavailable teammates.
///
/// Teammates whose stats cannot be fetched are skipped.
pub fn detect_opportunity(
    target: &PlayerRecord,
    roster: &[PlayerRecord],
    stats: &dyn StatsProvider,
    config: &OpportunityConfig,
) -> Opportunity {
    let absent = unavailable_teammates(target, roster);
    if absent.is_empty() {
        return Opportunity::none();
    }

    let mut best: Option<(&PlayerRecord, f64)> = None;
    for teammate in absent.into_iter().take(config.max_absences) {
        let season = match stats.season_stats(teammate.id) {
            Ok(season) => season,
            Err(e) => {
                warn!(teammate = %teammate.id, error = %e, "skipping teammate without stats");
                continue;
            }
        };
        let usage = usage_proxy(&season, config);
        debug!(teammate = %teammate.id, usage, "unavailable teammate usage");
        if best.map_or(true, |(_, top)| usage > top) {
            best = Some((teammate, usage));
        }
    }

    let Some((teammate, usage)) = best else {
        return Opportunity::none();
    };

    let high_usage = usage > config.high_usage_threshold;
    let reason = if high_usage {
        format!("{} out (usage {:.1})", teammate.name, usage)
    } else {
        teammate.name.clone()
    };

    Opportunity {
        opportunity: true,
        high_usage,
        reason: Some(reason),
        teammate: Some(teammate.id),
        usage: Some(usage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{AvailabilityStatus, Position, TeamId};
    use crate::error::{EngineError, Result};
    use crate::model::GameLogEntry;
    use std::collections::HashMap;

    struct FakeStats(HashMap<PlayerId, StatBag>);

    impl StatsProvider for FakeStats {
        fn season_stats(&self, player: PlayerId) -> Result<StatBag> {
            self.0.get(&player).cloned().ok_or(EngineError::Fetch {
                player_id: player.to_string(),
                message: "not cached".to_string(),
            })
        }

        fn game_log(&self, _player: PlayerId) -> Result<Vec<GameLogEntry>> {
            Ok(Vec::new())
        }
    }

    fn player(id: u64, position: Position, status: AvailabilityStatus, ownership: f64) -> PlayerRecord {
        PlayerRecord {
            id: PlayerId::new(id),
            name: format!("Player {}", id),
            team_id: TeamId::new(1),
            position,
            ownership_pct: ownership,
            price: 0,
            status,
            minutes_played: 1000,
            season_stats: StatBag::new(),
            projected_points: None,
        }
    }

    fn usage(points: f64, assists: f64, turnovers: f64) -> StatBag {
        StatBag::new()
            .with("points", points)
            .with("assists", assists)
            .with("turnovers", turnovers)
    }

    #[test]
    fn test_no_absences_no_opportunity() {
        let target = player(1, Position::PG, AvailabilityStatus::Active, 50.0);
        let roster = vec![target.clone(), player(2, Position::SG, AvailabilityStatus::Active, 40.0)];
        let result = detect_opportunity(&target, &roster, &FakeStats(HashMap::new()), &OpportunityConfig::default());
        assert_eq!(result, Opportunity::none());
    }

    #[test]
    fn test_high_usage_absence() {
        let target = player(1, Position::PG, AvailabilityStatus::Active, 5.0);
        let roster = vec![
            target.clone(),
            player(2, Position::SG, AvailabilityStatus::Out, 90.0),
            player(3, Position::PG, AvailabilityStatus::Doubtful, 30.0),
            // Different role group, ignored
            player(4, Position::C, AvailabilityStatus::Out, 95.0),
        ];
        let stats = FakeStats(HashMap::from([
            (PlayerId::new(2), usage(27.0, 6.0, 3.0)),
            (PlayerId::new(3), usage(10.0, 4.0, 2.0)),
            (PlayerId::new(4), usage(40.0, 10.0, 1.0)),
        ]));

        let result = detect_opportunity(&target, &roster, &stats, &OpportunityConfig::default());

        assert!(result.opportunity);
        assert!(result.high_usage);
        assert_eq!(result.teammate, Some(PlayerId::new(2)));
        assert_eq!(result.usage, Some(30.0));
        assert!(result.reason.unwrap().contains("Player 2"));
    }

    #[test]
    fn test_plain_opportunity_uses_teammate_name() {
        let target = player(1, Position::SF, AvailabilityStatus::Active, 5.0);
        let roster = vec![target.clone(), player(2, Position::PF, AvailabilityStatus::InjuredReserve, 10.0)];
        let stats = FakeStats(HashMap::from([(PlayerId::new(2), usage(12.0, 2.0, 1.0))]));

        let result = detect_opportunity(&target, &roster, &stats, &OpportunityConfig::default());

        assert!(result.opportunity);
        assert!(!result.high_usage);
        assert_eq!(result.reason.as_deref(), Some("Player 2"));
    }

    #[test]
    fn test_threshold_is_strict() {
        let target = player(1, Position::PG, AvailabilityStatus::Active, 5.0);
        let roster = vec![target.clone(), player(2, Position::SG, AvailabilityStatus::Out, 10.0)];
        let stats = FakeStats(HashMap::from([(PlayerId::new(2), usage(18.0, 4.0, 2.0))]));

        let result = detect_opportunity(&target, &roster, &stats, &OpportunityConfig::default());
        assert_eq!(result.usage, Some(20.0));
        assert!(!result.high_usage);
    }

    #[test]
    fn test_only_three_most_prominent_considered() {
        let target = player(1, Position::PG, AvailabilityStatus::Active, 5.0);
        let roster = vec![
            target.clone(),
            player(2, Position::SG, AvailabilityStatus::Out, 40.0),
            player(3, Position::SG, AvailabilityStatus::Out, 30.0),
            player(4, Position::PG, AvailabilityStatus::Out, 20.0),
            player(5, Position::PG, AvailabilityStatus::Out, 1.0),
        ];
        let stats = FakeStats(HashMap::from([
            (PlayerId::new(2), usage(5.0, 1.0, 0.0)),
            (PlayerId::new(3), usage(6.0, 1.0, 0.0)),
            (PlayerId::new(4), usage(7.0, 1.0, 0.0)),
            (PlayerId::new(5), usage(50.0, 10.0, 0.0)),
        ]));

        let result = detect_opportunity(&target, &roster, &stats, &OpportunityConfig::default());
        assert_eq!(result.teammate, Some(PlayerId::new(4)));
    }

    #[test]
    fn test_fetch_failures_are_skipped() {
        let target = player(1, Position::PG, AvailabilityStatus::Active, 5.0);
        let roster = vec![
            target.clone(),
            player(2, Position::SG, AvailabilityStatus::Out, 40.0),
            player(3, Position::SG, AvailabilityStatus::Out, 30.0),
        ];
        let stats = FakeStats(HashMap::from([(PlayerId::new(3), usage(9.0, 1.0, 0.0))]));

        let result = detect_opportunity(&target, &roster, &stats, &OpportunityConfig::default());
        assert_eq!(result.teammate, Some(PlayerId::new(3)));

        let nothing = detect_opportunity(&target, &roster, &FakeStats(HashMap::new()), &OpportunityConfig::default());
        assert!(!nothing.opportunity);
    }

    #[test]
    fn test_unavailable_teammates_excludes_target_even_if_out() {
        let target = player(1, Position::PG, AvailabilityStatus::Out, 5.0);
        let roster = vec![target.clone()];
        assert!(unavailable_teammates(&target, &roster).is_empty());
    }
}
