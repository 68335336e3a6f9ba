//! Captaincy picks for one scoring round.

use super::{format_breakdown, print_rows, CommandContext, DEFAULT_FETCH_CONCURRENCY};
use crate::{
    cli::types::{PlayerId, Position, Round},
    engine::{
        captaincy::{rank_captains, CaptaincyCandidate},
        fixture_difficulty::RankScale,
    },
    error::Result,
    model::{fixtures_for_team, FixtureSide, PlayerRecord},
    provider::{fetch_game_logs, SnapshotProvider},
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CaptainsParams {
    /// Defaults to the first round without game logs.
    pub round: Option<Round>,
    /// Defaults to the scale the snapshot's sport publishes.
    pub scale: Option<RankScale>,
    pub position: Option<Position>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptainRow {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub round_index: Round,
    /// Fixtures in the round: 0 for a blank, 2 for a double.
    pub fixtures: usize,
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
}

pub fn captains(ctx: &CommandContext, params: &CaptainsParams) -> Result<Vec<CaptainRow>> {
    let snapshot = &ctx.snapshot;
    let round = params.round.unwrap_or_else(|| snapshot.next_round());
    let scale = params.scale.unwrap_or_else(|| RankScale::for_sport(snapshot.sport));
    let mapper = ctx.config.fixture_bands.mapper(scale)?;
    let config = &ctx.config.captaincy;

    let players: Vec<&PlayerRecord> = snapshot
        .players
        .iter()
        .filter(|p| p.is_available())
        .filter(|p| params.position.map_or(true, |pos| p.position == pos))
        .collect();

    let provider = SnapshotProvider::new(snapshot);
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let fetched = fetch_game_logs(&provider, &ids, DEFAULT_FETCH_CONCURRENCY)?;

    let candidates: Vec<(CaptaincyCandidate, Vec<FixtureSide>)> = players
        .iter()
        .filter_map(|&player| {
            let log = fetched.log(player.id)?;
            let candidate = CaptaincyCandidate::from_history(player, log, config);
            Some((candidate, fixtures_for_team(&snapshot.fixtures, player.team_id, round)))
        })
        .collect();

    let cache_params = format!("round={};scale={:?};position={:?}", round, scale, params.position);
    let ranked = ctx.cached_ranking("captains", cache_params, || {
        Ok(rank_captains(&candidates, &snapshot.teams, &mapper, config))
    })?;

    info!(%round, candidates = candidates.len(), "ranked captains");

    let fixture_counts: HashMap<PlayerId, usize> = candidates
        .iter()
        .map(|(c, sides)| (c.player_id, sides.len()))
        .collect();

    ranked
        .into_iter()
        .take(params.limit.unwrap_or(usize::MAX))
        .map(|result| {
            let player = snapshot.player(result.player_id)?;
            Ok(CaptainRow {
                player_id: player.id,
                name: player.name.clone(),
                position: player.position,
                round_index: round,
                fixtures: fixture_counts.get(&player.id).copied().unwrap_or(0),
                score: result.score,
                breakdown: result.breakdown,
            })
        })
        .collect()
}

pub fn handle_captains(ctx: &CommandContext, params: &CaptainsParams, as_json: bool) -> Result<()> {
    let rows = captains(ctx, params)?;
    print_rows(&rows, as_json, |row| {
        format!(
            "{:<24} {:<4} gw {} x{}  score {:>6.1}  [{}]",
            row.name,
            row.position,
            row.round_index,
            row.fixtures,
            row.score,
            format_breakdown(&row.breakdown)
        )
    })
}
