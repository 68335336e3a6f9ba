//! Per-player form and opportunity flags.

use super::opportunity::detect_opportunity;
use super::trend::{classify_metric_trend, detect_surge, season_baseline, window_rates, Trend};
use crate::cli::types::PlayerId;
use crate::config::EngineConfig;
use crate::model::{recent_window, GameLogEntry, PlayerRecord};
use crate::provider::StatsProvider;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFlags {
    pub player_id: PlayerId,
    pub trend: Trend,
    pub surge: bool,
    pub surging_metrics: usize,
    pub opportunity: bool,
    pub high_usage: bool,
    /// Per-90 rate of each surge metric over the surge window.
    pub window_rates: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Trend, surge and opportunity flags for `player`.
///
/// `season_log` is oldest first. The surge baseline is the season per-game
/// mean in the configured aggregation; `roster` may be the whole snapshot.
pub fn evaluate_flags(
    player: &PlayerRecord,
    season_log: &[GameLogEntry],
    roster: &[PlayerRecord],
    stats: &dyn StatsProvider,
    config: &EngineConfig,
) -> PlayerFlags {
    let sport = player.position.sport();

    let trend_window = recent_window(season_log, config.trend.window);
    let trend = classify_metric_trend(trend_window, sport.fantasy_points_metric(), &config.trend);

    let surge_window = recent_window(season_log, config.surge.window);
    let metrics = config.surge.metrics_for(sport);
    let baseline = season_baseline(season_log, &metrics, config.surge.aggregation, surge_window.len());
    let surge = detect_surge(surge_window, &baseline, &metrics, &config.surge);
    let rates = window_rates(surge_window, &metrics);

    let opportunity = detect_opportunity(player, roster, stats, &config.opportunity);

    debug!(
        player = %player.id,
        %trend,
        surge = surge.surge,
        opportunity = opportunity.opportunity,
        "evaluated flags"
    );

    let reason = opportunity.reason.clone().or_else(|| {
        surge
            .surge
            .then(|| format!("surging: {}", surge.metrics.join(", ")))
    });

    PlayerFlags {
        player_id: player.id,
        trend,
        surge: surge.surge,
        surging_metrics: surge.surging_metrics,
        opportunity: opportunity.opportunity,
        high_usage: opportunity.high_usage,
        window_rates: rates,
        reason,
    }
}
