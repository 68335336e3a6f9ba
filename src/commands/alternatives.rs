//! Cheaper players who produce like a target player.

use super::{format_breakdown, print_rows, CommandContext};
use crate::{
    cli::types::{PlayerId, Position},
    engine::similarity::{find_alternatives, SimilarityQuery},
    error::Result,
    model::ScoreResult,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone)]
pub struct AlternativesParams {
    pub player: PlayerId,
    /// Ceiling in display units (e.g. 8.5 for an FPL price of 85).
    pub max_price: Option<f64>,
    pub min_minutes: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRow {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub score: f64,
    /// Display units saved against the target.
    pub price_delta: f64,
    pub price: f64,
    pub breakdown: BTreeMap<String, f64>,
}

/// Ranked alternatives to `params.player`, most similar first.
pub fn alternatives(ctx: &CommandContext, params: &AlternativesParams) -> Result<Vec<AlternativeRow>> {
    let snapshot = &ctx.snapshot;
    let target = snapshot.player(params.player)?;
    let scale = snapshot.sport.price_scale();

    let query = SimilarityQuery {
        min_minutes: params.min_minutes.unwrap_or(ctx.config.similarity.min_minutes),
        max_price: params
            .max_price
            .map(|p| (p * scale).round() as i64)
            .or(ctx.config.similarity.max_price),
    };

    let cache_params = format!(
        "player={};min={};max={:?}",
        target.id, query.min_minutes, query.max_price
    );
    let ranked: Vec<ScoreResult> = ctx.cached_ranking("alternatives", cache_params, || {
        let matches = find_alternatives(target, &snapshot.players, &ctx.config.weights, &query)?;
        Ok(matches.iter().map(|m| m.to_score_result()).collect())
    })?;

    info!(target = %target.id, matches = ranked.len(), "ranked alternatives");

    let limit = params.limit.unwrap_or(usize::MAX);
    ranked
        .into_iter()
        .take(limit)
        .map(|result| {
            let candidate = snapshot.player(result.player_id)?;
            Ok(AlternativeRow {
                player_id: candidate.id,
                name: candidate.name.clone(),
                position: candidate.position,
                score: result.score,
                price_delta: (target.price - candidate.price) as f64 / scale,
                price: candidate.display_price(),
                breakdown: result.breakdown,
            })
        })
        .collect()
}

pub fn handle_alternatives(ctx: &CommandContext, params: &AlternativesParams, as_json: bool) -> Result<()> {
    let rows = alternatives(ctx, params)?;
    print_rows(&rows, as_json, |row| {
        format!(
            "{:<24} {:<4} sim {:.3}  price {:.1}  saves {:.1}  [{}]",
            row.name,
            row.position,
            row.score,
            row.price,
            row.price_delta,
            format_breakdown(&row.breakdown)
        )
    })
}
