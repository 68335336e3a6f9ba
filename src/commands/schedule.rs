//! Upcoming fixture difficulty for one team.

use super::CommandContext;
use crate::{
    cli::types::{Round, TeamId},
    engine::fixture_difficulty::{team_schedule, RankScale, TeamSchedule},
    error::Result,
    model::Snapshot,
};
use serde::Serialize;

pub const DEFAULT_HORIZON: u16 = 5;

#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub team: TeamId,
    pub from: Option<Round>,
    pub horizon: u16,
    pub scale: Option<RankScale>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub team: String,
    pub scale: RankScale,
    #[serde(flatten)]
    pub schedule: TeamSchedule,
}

fn team_label(snapshot: &Snapshot, id: TeamId) -> String {
    snapshot
        .team(id)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| id.to_string())
}

pub fn schedule(ctx: &CommandContext, params: &ScheduleParams) -> Result<ScheduleView> {
    let snapshot = &ctx.snapshot;
    snapshot.require_team(params.team)?;

    let scale = params.scale.unwrap_or_else(|| RankScale::for_sport(snapshot.sport));
    let mapper = ctx.config.fixture_bands.mapper(scale)?;
    let from = params.from.unwrap_or_else(|| snapshot.next_round());

    Ok(ScheduleView {
        team: team_label(snapshot, params.team),
        scale,
        schedule: team_schedule(params.team, &snapshot.fixtures, from, params.horizon, &mapper),
    })
}

pub fn handle_schedule(ctx: &CommandContext, params: &ScheduleParams, as_json: bool) -> Result<()> {
    let view = schedule(ctx, params)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?); // tarpaulin::skip
        return Ok(());
    }

    println!("{}", view.team); // tarpaulin::skip
    for cell in &view.schedule.cells {
        let opponents = if cell.opponents.is_empty() {
            "blank".to_string()
        } else {
            cell.opponents
                .iter()
                .map(|o| {
                    format!(
                        "{} ({}) {} {}",
                        team_label(&ctx.snapshot, o.opponent),
                        if o.is_home { "H" } else { "A" },
                        o.difficulty_rank,
                        o.band
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("  round {:>3}: {}", cell.round_index, opponents); // tarpaulin::skip
    }
    match view.schedule.average_difficulty {
        Some(avg) => println!("  average difficulty {:.2}", avg), // tarpaulin::skip
        None => println!("  no fixtures in range"),               // tarpaulin::skip
    }
    Ok(())
}
