//! Trend, surge and opportunity flags for one player.

use super::{format_breakdown, CommandContext};
use crate::{
    cli::types::PlayerId,
    engine::{
        flags::{evaluate_flags, PlayerFlags},
        trend::Aggregation,
    },
    error::Result,
    provider::{SnapshotProvider, StatsProvider},
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct FlagsParams {
    pub player: PlayerId,
    /// Surge window override.
    pub window: Option<usize>,
    pub aggregation: Option<Aggregation>,
}

pub fn flags(ctx: &CommandContext, params: &FlagsParams) -> Result<PlayerFlags> {
    let snapshot = &ctx.snapshot;
    let player = snapshot.player(params.player)?;

    let mut config = ctx.config.clone();
    if let Some(window) = params.window {
        config.surge.window = window;
    }
    if let Some(aggregation) = params.aggregation {
        config.surge.aggregation = aggregation;
    }

    let provider = SnapshotProvider::new(snapshot);
    let season_log = provider.game_log(player.id)?;
    let flags = evaluate_flags(player, &season_log, &snapshot.players, &provider, &config);

    info!(player = %player.id, trend = %flags.trend, surge = flags.surge, "evaluated flags");
    Ok(flags)
}

pub fn handle_flags(ctx: &CommandContext, params: &FlagsParams, as_json: bool) -> Result<()> {
    let flags = flags(ctx, params)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&flags)?); // tarpaulin::skip
        return Ok(());
    }

    let name = ctx
        .snapshot
        .player(flags.player_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|_| flags.player_id.to_string());
    // tarpaulin::skip - console output
    println!(
        "{}: trend {}, surge {} ({} metrics), opportunity {}{}",
        name,
        flags.trend,
        flags.surge,
        flags.surging_metrics,
        flags.opportunity,
        if flags.high_usage { " (high usage)" } else { "" }
    );
    if let Some(reason) = &flags.reason {
        println!("  {}", reason); // tarpaulin::skip
    }
    if !flags.window_rates.is_empty() {
        println!("  per 90: {}", format_breakdown(&flags.window_rates)); // tarpaulin::skip
    }
    Ok(())
}
