//! Low-owned players with high projected output.

use super::{format_breakdown, print_rows, CommandContext, DEFAULT_FETCH_CONCURRENCY};
use crate::{
    cli::types::{PlayerId, Position},
    engine::{
        differential::{rank_differentials, DifferentialCategory, DifferentialInput},
        projection::projected_points_per_fixture,
    },
    error::Result,
    model::{recent_window, PlayerRecord},
    provider::{fetch_game_logs, SnapshotProvider},
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct DifferentialsParams {
    pub horizon: Option<u32>,
    pub max_ownership: Option<f64>,
    pub position: Option<Position>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentialRow {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub ownership_pct: f64,
    pub projected_points: f64,
    pub category: DifferentialCategory,
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
}

pub fn differentials(ctx: &CommandContext, params: &DifferentialsParams) -> Result<Vec<DifferentialRow>> {
    let snapshot = &ctx.snapshot;
    let mut config = ctx.config.differential.clone();
    if let Some(horizon) = params.horizon {
        config.horizon_fixtures = horizon;
    }
    if let Some(max_ownership) = params.max_ownership {
        config.max_ownership = max_ownership;
    }

    let candidates: Vec<&PlayerRecord> = snapshot
        .players
        .iter()
        .filter(|p| p.is_available())
        .filter(|p| params.position.map_or(true, |pos| p.position == pos))
        .filter(|p| p.ownership_pct <= config.max_ownership)
        .collect();

    let provider = SnapshotProvider::new(snapshot);
    let ids: Vec<PlayerId> = candidates.iter().map(|p| p.id).collect();
    let fetched = fetch_game_logs(&provider, &ids, DEFAULT_FETCH_CONCURRENCY)?;

    let window_len = ctx.config.trend.window;
    let inputs: Vec<(&PlayerRecord, DifferentialInput)> = candidates
        .iter()
        .filter_map(|&player| {
            let window = recent_window(fetched.log(player.id)?, window_len);
            let category = DifferentialCategory::derive(player.minutes_played, window);
            let projected = projected_points_per_fixture(player, window);
            Some((player, DifferentialInput::from_player(player, projected, category)))
        })
        .collect();

    let cache_params = format!(
        "horizon={};max_own={};position={:?}",
        config.horizon_fixtures, config.max_ownership, params.position
    );
    let ranked = ctx.cached_ranking("differentials", cache_params, || {
        let scoring: Vec<DifferentialInput> = inputs.iter().map(|(_, i)| i.clone()).collect();
        Ok(rank_differentials(&scoring, &config))
    })?;

    info!(
        candidates = inputs.len(),
        dropped = fetched.dropped.len(),
        "ranked differentials"
    );

    let by_id: HashMap<PlayerId, &(&PlayerRecord, DifferentialInput)> =
        inputs.iter().map(|entry| (entry.1.player_id, entry)).collect();
    Ok(ranked
        .into_iter()
        .filter_map(|result| {
            let (player, input) = by_id.get(&result.player_id)?;
            Some(DifferentialRow {
                player_id: player.id,
                name: player.name.clone(),
                position: player.position,
                ownership_pct: player.ownership_pct,
                projected_points: input.projected_points,
                category: input.category,
                score: result.score,
                breakdown: result.breakdown,
            })
        })
        .take(params.limit.unwrap_or(usize::MAX))
        .collect())
}

pub fn handle_differentials(ctx: &CommandContext, params: &DifferentialsParams, as_json: bool) -> Result<()> {
    let rows = differentials(ctx, params)?;
    print_rows(&rows, as_json, |row| {
        format!(
            "{:<24} {:<4} own {:>5.1}%  proj {:>5.2}  {:<11} score {:>9.1}  [{}]",
            row.name,
            row.position,
            row.ownership_pct,
            row.projected_points,
            row.category,
            row.score,
            format_breakdown(&row.breakdown)
        )
    })
}
