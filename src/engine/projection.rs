//! Expected fantasy points per upcoming fixture.

use super::normalize::per90;
use super::trend::{aggregate, metric_series, Aggregation};
use crate::model::{GameLogEntry, PlayerRecord};

/// Expected fantasy points for one upcoming fixture.
///
/// Prefers the provider's own projection, then the recent-window mean of the
/// sport's fantasy points, then the season per-90 rate over one regulation
/// game. A player with no minutes and no history projects to zero.
pub fn projected_points_per_fixture(player: &PlayerRecord, window: &[GameLogEntry]) -> f64 {
    if let Some(projected) = player.projected_points.filter(|p| p.is_finite()) {
        return projected;
    }

    let sport = player.position.sport();
    let metric = sport.fantasy_points_metric();
    if !window.is_empty() {
        return aggregate(&metric_series(window, metric), Aggregation::Mean);
    }

    per90(player.stat(metric), player.minutes_played as f64) * sport.regulation_minutes() / 90.0
}
