//! Captaincy scoring across one or more fixtures in a scoring window.
//!
//! Per fixture: `potential * 0.6 + weakness * 0.3 + home * 0.1`, each
//! component on a 0..=100 scale. A player's total is the *sum* over their
//! fixtures so double rounds are rewarded; the displayed breakdown is the
//! *average* component value per fixture.

use super::fixture_difficulty::{DifficultyBand, FixtureDifficultyMapper};
use super::normalize::per90;
use super::trend::{aggregate, metric_series, Aggregation};
use crate::cli::types::{PlayerId, TeamId};
use crate::model::{by_score_desc, recent_window, FixtureSide, GameLogEntry, PlayerRecord, ScoreResult, TeamRecord};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const SCORING_POTENTIAL: &str = "scoringPotential";
pub const OPPONENT_WEAKNESS: &str = "opponentWeakness";
pub const HOME_ADVANTAGE: &str = "homeAdvantage";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptaincyConfig {
    /// Recent fantasy points per game that counts as a full 1.0.
    pub recent_ceiling: f64,
    /// Season fantasy points per game that counts as a full 1.0.
    pub season_ceiling: f64,
    pub recent_weight: f64,
    pub season_weight: f64,
    pub difficulty_weight: f64,
    pub defence_weight: f64,
    pub potential_weight: f64,
    pub weakness_weight: f64,
    pub home_weight: f64,
    /// Defensive strength at or below this reads as fully weak.
    pub defence_floor: f64,
    /// Defensive strength at or above this reads as fully strong.
    pub defence_ceiling: f64,
    /// Weakness used when the opponent has no rating.
    pub unknown_defence_weakness: f64,
    pub recent_window: usize,
}

impl Default for CaptaincyConfig {
    fn default() -> Self {
        Self {
            recent_ceiling: 10.0,
            season_ceiling: 8.0,
            recent_weight: 0.7,
            season_weight: 0.3,
            difficulty_weight: 0.6,
            defence_weight: 0.4,
            potential_weight: 0.6,
            weakness_weight: 0.3,
            home_weight: 0.1,
            defence_floor: 1000.0,
            defence_ceiling: 1400.0,
            unknown_defence_weakness: 0.5,
            recent_window: 5,
        }
    }
}

/// Production inputs for one captaincy candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptaincyCandidate {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    /// Mean fantasy points over the recent window.
    pub recent_production: f64,
    /// Season fantasy points per game.
    pub season_rate: f64,
}

impl CaptaincyCandidate {
    /// Derive production from an oldest-first season log.
    ///
    /// Without a log, both rates fall back to season points per 90.
    pub fn from_history(player: &PlayerRecord, season_log: &[GameLogEntry], config: &CaptaincyConfig) -> Self {
        let metric = player.position.sport().fantasy_points_metric();
        let (recent_production, season_rate) = if season_log.is_empty() {
            let rate = per90(player.stat(metric), player.minutes_played as f64);
            (rate, rate)
        } else {
            let recent = recent_window(season_log, config.recent_window);
            (
                aggregate(&metric_series(recent, metric), Aggregation::Mean),
                aggregate(&metric_series(season_log, metric), Aggregation::Mean),
            )
        };
        Self {
            player_id: player.id,
            team_id: player.team_id,
            recent_production,
            season_rate,
        }
    }
}

/// Component values for one fixture, each on a 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureComponents {
    pub scoring_potential: f64,
    pub opponent_weakness: f64,
    pub home_factor: f64,
    pub composite: f64,
    pub band: DifficultyBand,
}

fn capped(value: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 {
        return 0.0;
    }
    (value / ceiling).clamp(0.0, 1.0)
}

pub fn scoring_potential(recent: f64, season: f64, config: &CaptaincyConfig) -> f64 {
    (capped(recent, config.recent_ceiling) * config.recent_weight
        + capped(season, config.season_ceiling) * config.season_weight)
        * 100.0
}

/// Step function over the fixture's band: easy 1.0, neutral 0.5, hard 0.2.
///
/// On the 1..=5 FDR scale this is rank <= 2, rank == 3, otherwise.
pub fn fixture_difficulty_score(band: DifficultyBand) -> f64 {
    match band {
        DifficultyBand::Elite | DifficultyBand::Good => 1.0,
        DifficultyBand::Neutral => 0.5,
        DifficultyBand::Tough | DifficultyBand::Brutal => 0.2,
    }
}

/// 1.0 for the weakest defence, 0.0 for the strongest.
pub fn defensive_weakness(rating: Option<f64>, config: &CaptaincyConfig) -> f64 {
    let Some(rating) = rating else {
        return config.unknown_defence_weakness;
    };
    let span = config.defence_ceiling - config.defence_floor;
    if span <= 0.0 {
        return config.unknown_defence_weakness;
    }
    ((config.defence_ceiling - rating) / span).clamp(0.0, 1.0)
}

/// Components for one fixture. `opponent` is the opposing team's record, if known.
pub fn fixture_components(
    candidate: &CaptaincyCandidate,
    side: &FixtureSide,
    opponent: Option<&TeamRecord>,
    mapper: &FixtureDifficultyMapper,
    config: &CaptaincyConfig,
) -> FixtureComponents {
    let band = mapper.band(side.difficulty_rank);
    let potential = scoring_potential(candidate.recent_production, candidate.season_rate, config);

    // The opponent defends at the other venue
    let rating = opponent.and_then(|t| t.defensive_strength(!side.is_home));
    let weakness = (fixture_difficulty_score(band) * config.difficulty_weight
        + defensive_weakness(rating, config) * config.defence_weight)
        * 100.0;

    let home = if side.is_home { 100.0 } else { 0.0 };
    let composite = potential * config.potential_weight + weakness * config.weakness_weight + home * config.home_weight;

    FixtureComponents {
        scoring_potential: potential,
        opponent_weakness: weakness,
        home_factor: home,
        composite,
        band,
    }
}

/// Sum composites into the total; average components into the breakdown.
///
/// No fixtures (a blank round) scores exactly zero.
pub fn combine_fixtures(player_id: PlayerId, fixtures: &[FixtureComponents]) -> ScoreResult {
    if fixtures.is_empty() {
        return ScoreResult::new(player_id, 0.0)
            .with_component(SCORING_POTENTIAL, 0.0)
            .with_component(OPPONENT_WEAKNESS, 0.0)
            .with_component(HOME_ADVANTAGE, 0.0);
    }

    let n = fixtures.len() as f64;
    let total: f64 = fixtures.iter().map(|f| f.composite).sum();
    let mean = |component: fn(&FixtureComponents) -> f64| fixtures.iter().map(component).sum::<f64>() / n;

    ScoreResult::new(player_id, total)
        .with_component(SCORING_POTENTIAL, mean(|f| f.scoring_potential))
        .with_component(OPPONENT_WEAKNESS, mean(|f| f.opponent_weakness))
        .with_component(HOME_ADVANTAGE, mean(|f| f.home_factor))
}

fn find_team(teams: &[TeamRecord], id: TeamId) -> Option<&TeamRecord> {
    teams.iter().find(|t| t.id == id)
}

pub fn score_captaincy(
    candidate: &CaptaincyCandidate,
    sides: &[FixtureSide],
    teams: &[TeamRecord],
    mapper: &FixtureDifficultyMapper,
    config: &CaptaincyConfig,
) -> ScoreResult {
    let components: Vec<FixtureComponents> = sides
        .iter()
        .map(|side| fixture_components(candidate, side, find_team(teams, side.opponent), mapper, config))
        .collect();
    combine_fixtures(candidate.player_id, &components)
}

/// Score every candidate with its fixtures and rank by total, ties by id.
pub fn rank_captains(
    candidates: &[(CaptaincyCandidate, Vec<FixtureSide>)],
    teams: &[TeamRecord],
    mapper: &FixtureDifficultyMapper,
    config: &CaptaincyConfig,
) -> Vec<ScoreResult> {
    let mut ranked: Vec<ScoreResult> = candidates
        .par_iter()
        .map(|(candidate, sides)| score_captaincy(candidate, sides, teams, mapper, config))
        .collect();
    ranked.sort_by(by_score_desc);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Round;
    use crate::engine::fixture_difficulty::RankScale;

    fn candidate(recent: f64, season: f64) -> CaptaincyCandidate {
        CaptaincyCandidate {
            player_id: PlayerId::new(1),
            team_id: TeamId::new(1),
            recent_production: recent,
            season_rate: season,
        }
    }

    fn side(opponent: u32, is_home: bool, rank: i32) -> FixtureSide {
        FixtureSide {
            round_index: Round::new(1),
            opponent: TeamId::new(opponent),
            is_home,
            difficulty_rank: rank,
        }
    }

    fn components(composite: f64, potential: f64, weakness: f64, home: f64) -> FixtureComponents {
        FixtureComponents {
            scoring_potential: potential,
            opponent_weakness: weakness,
            home_factor: home,
            composite,
            band: DifficultyBand::Neutral,
        }
    }

    #[test]
    fn test_double_round_sums_total_and_averages_breakdown() {
        let result = combine_fixtures(
            PlayerId::new(1),
            &[components(55.0, 60.0, 50.0, 100.0), components(40.0, 50.0, 30.0, 0.0)],
        );
        assert_eq!(result.score, 95.0);
        assert_eq!(result.component(SCORING_POTENTIAL), Some(55.0));
        assert_eq!(result.component(OPPONENT_WEAKNESS), Some(40.0));
        assert_eq!(result.component(HOME_ADVANTAGE), Some(50.0));
    }

    #[test]
    fn test_blank_round_scores_zero() {
        let mapper = FixtureDifficultyMapper::for_scale(RankScale::Fdr5);
        let result = score_captaincy(&candidate(12.0, 9.0), &[], &[], &mapper, &CaptaincyConfig::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.component(HOME_ADVANTAGE), Some(0.0));
    }

    #[test]
    fn test_potential_is_capped_at_100() {
        let config = CaptaincyConfig::default();
        assert!((scoring_potential(50.0, 50.0, &config) - 100.0).abs() < 1e-9);
        assert_eq!(scoring_potential(-3.0, 0.0, &config), 0.0);
        // 0.5 * 0.7 + 0.5 * 0.3
        assert!((scoring_potential(5.0, 4.0, &config) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_step_function() {
        let mapper = FixtureDifficultyMapper::for_scale(RankScale::Fdr5);
        let step = |rank| fixture_difficulty_score(mapper.band(rank));
        assert_eq!(step(1), 1.0);
        assert_eq!(step(2), 1.0);
        assert_eq!(step(3), 0.5);
        assert_eq!(step(4), 0.2);
        assert_eq!(step(5), 0.2);
    }

    #[test]
    fn test_defensive_weakness_range() {
        let config = CaptaincyConfig::default();
        assert_eq!(defensive_weakness(Some(1000.0), &config), 1.0);
        assert_eq!(defensive_weakness(Some(1400.0), &config), 0.0);
        assert_eq!(defensive_weakness(Some(1200.0), &config), 0.5);
        assert_eq!(defensive_weakness(Some(1600.0), &config), 0.0);
        assert_eq!(defensive_weakness(None, &config), 0.5);
    }

    #[test]
    fn test_single_fixture_composite() {
        let config = CaptaincyConfig::default();
        let mapper = FixtureDifficultyMapper::for_scale(RankScale::Fdr5);
        let opponent = TeamRecord {
            id: TeamId::new(2),
            name: "Opp".to_string(),
            short_name: None,
            strength_defence_home: Some(1400.0),
            strength_defence_away: Some(1100.0),
        };

        // Home fixture: opponent defends away at 1100 -> weakness 0.75
        let c = fixture_components(&candidate(10.0, 8.0), &side(2, true, 2), Some(&opponent), &mapper, &config);
        assert!((c.scoring_potential - 100.0).abs() < 1e-9);
        assert!((c.opponent_weakness - 90.0).abs() < 1e-9);
        assert_eq!(c.home_factor, 100.0);
        assert!((c.composite - (60.0 + 27.0 + 10.0)).abs() < 1e-9);
        assert_eq!(c.band, DifficultyBand::Good);
    }

    #[test]
    fn test_total_is_sum_of_single_fixture_scores() {
        let config = CaptaincyConfig::default();
        let mapper = FixtureDifficultyMapper::for_scale(RankScale::Fdr5);
        let c = candidate(7.0, 6.0);
        let first = side(2, true, 2);
        let second = side(3, false, 4);

        let double = score_captaincy(&c, &[first, second], &[], &mapper, &config);
        let one = score_captaincy(&c, &[first], &[], &mapper, &config);
        let two = score_captaincy(&c, &[second], &[], &mapper, &config);

        assert_eq!(double.score, one.score + two.score);
        assert_eq!(double.component(HOME_ADVANTAGE), Some(50.0));
    }

    #[test]
    fn test_ranking_prefers_double_round() {
        let config = CaptaincyConfig::default();
        let mapper = FixtureDifficultyMapper::for_scale(RankScale::Fdr5);
        let mut star = candidate(10.0, 8.0);
        star.player_id = PlayerId::new(10);
        let mut doubler = candidate(6.0, 5.0);
        doubler.player_id = PlayerId::new(20);

        let ranked = rank_captains(
            &[
                (star, vec![side(2, false, 5)]),
                (doubler, vec![side(3, true, 2), side(4, true, 2)]),
            ],
            &[],
            &mapper,
            &config,
        );
        assert_eq!(ranked[0].player_id, PlayerId::new(20));
    }
}
