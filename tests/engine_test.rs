//! End-to-end checks of the scoring engine through the public API

use fantasy_scout::{
    engine::{
        captaincy::{combine_fixtures, FixtureComponents, HOME_ADVANTAGE, OPPONENT_WEAKNESS, SCORING_POTENTIAL},
        differential::{score_differential, DifferentialCategory, DifferentialConfig, DifferentialInput},
        fixture_difficulty::{DifficultyBand, FixtureDifficultyMapper, RankScale},
        similarity::{find_alternatives, SimilarityQuery},
        trend::{classify_trend, Trend, TrendConfig},
        weights::WeightTables,
    },
    AvailabilityStatus, EngineConfig, EngineError, PlayerId, PlayerRecord, Position, StatBag, TeamId,
};

fn forward(id: u64, price: i64, xg_per90: f64) -> PlayerRecord {
    let minutes = 900;
    PlayerRecord {
        id: PlayerId::new(id),
        name: format!("Forward {}", id),
        team_id: TeamId::new(id as u32),
        position: Position::FWD,
        ownership_pct: 5.0,
        price,
        status: AvailabilityStatus::Active,
        minutes_played: minutes,
        season_stats: StatBag::new().with("expected_goals", xg_per90 * minutes as f64 / 90.0),
        projected_points: None,
    }
}

#[test]
fn test_cheaper_lookalike_ranks_highly() {
    let target = forward(1, 120, 0.6);
    let mut keeper = forward(3, 50, 0.0);
    keeper.position = Position::GK;
    let pool = vec![target.clone(), forward(2, 80, 0.55), keeper];

    let matches = find_alternatives(&target, &pool, &WeightTables::default(), &SimilarityQuery::default()).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].player_id, PlayerId::new(2));
    assert!(matches[0].similarity > 0.8);
    assert_eq!(matches[0].price_delta as f64 / 10.0, 4.0);
}

#[test]
fn test_empty_pool_is_not_an_error() {
    let target = forward(1, 120, 0.6);
    let matches = find_alternatives(&target, &[], &WeightTables::default(), &SimilarityQuery::default()).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_missing_weight_table_aborts() {
    let target = forward(1, 120, 0.6);
    let result = find_alternatives(&target, &[], &WeightTables::empty(), &SimilarityQuery::default());
    match result {
        Err(e @ EngineError::MissingWeightTable { .. }) => {
            assert!(e.is_configuration());
            assert!(e.to_string().contains("FWD"));
        }
        other => panic!("expected MissingWeightTable, got {:?}", other),
    }
}

#[test]
fn test_comeback_differential() {
    let input = DifferentialInput {
        player_id: PlayerId::new(7),
        ownership_pct: 0.05,
        projected_points: 6.0,
        category: DifferentialCategory::Comeback,
    };
    let config = DifferentialConfig::default();
    let result = score_differential(&input, &config);

    assert!((result.breakdown["base"] - 1800.0).abs() < 1e-9);
    assert!((result.score - 2720.0).abs() < 1e-9);
    let parts: f64 = result.breakdown.values().sum();
    assert!((parts - result.score).abs() < 1e-9);
}

fn fixture(composite: f64, potential: f64, weakness: f64, home: f64) -> FixtureComponents {
    FixtureComponents {
        scoring_potential: potential,
        opponent_weakness: weakness,
        home_factor: home,
        composite,
        band: DifficultyBand::Neutral,
    }
}

#[test]
fn test_double_fixture_sums_total_and_averages_breakdown() {
    let result = combine_fixtures(
        PlayerId::new(9),
        &[fixture(55.0, 70.0, 40.0, 100.0), fixture(40.0, 50.0, 30.0, 0.0)],
    );

    assert_eq!(result.score, 95.0);
    assert_eq!(result.breakdown[SCORING_POTENTIAL], 60.0);
    assert_eq!(result.breakdown[OPPONENT_WEAKNESS], 35.0);
    assert_eq!(result.breakdown[HOME_ADVANTAGE], 50.0);
}

#[test]
fn test_trend_boundary_is_flat() {
    let config = TrendConfig::default();
    assert_eq!(classify_trend(&[10.0, 12.0], &config), Trend::Flat);
    assert_eq!(classify_trend(&[10.0, 12.5], &config), Trend::Rising);
    assert_eq!(classify_trend(&[10.0, 7.5], &config), Trend::Falling);
    assert_eq!(classify_trend(&[10.0], &config), Trend::Flat);
}

#[test]
fn test_out_of_range_ranks_clamp() {
    let rank32 = FixtureDifficultyMapper::for_scale(RankScale::Rank32);
    assert_eq!(rank32.band(0), rank32.band(1));
    assert_eq!(rank32.band(33), rank32.band(32));
    assert_eq!(rank32.band(-40), DifficultyBand::Brutal);
    assert_eq!(rank32.band(99), DifficultyBand::Elite);

    let fdr5 = FixtureDifficultyMapper::for_scale(RankScale::Fdr5);
    assert_eq!(fdr5.band(0), DifficultyBand::Elite);
    assert_eq!(fdr5.band(6), DifficultyBand::Brutal);
}

#[test]
fn test_default_config_is_valid() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
    for scale in [RankScale::Fdr5, RankScale::Rank32] {
        assert!(config.fixture_bands.mapper(scale).is_ok());
    }
}
