//! Fantasy Premier League payloads to canonical records.
//!
//! FPL encodes most decimals as strings (`"45.2"`), positions as
//! `element_type` 1..=4, availability as single letters and prices as
//! `now_cost` in tenths of a million.

use crate::cli::types::{AvailabilityStatus, PlayerId, Position, Round, Sport, TeamId};
use crate::error::Result;
use crate::model::{lenient_f64, FixtureRecord, GameLogEntry, PlayerRecord, Snapshot, StatBag, TeamRecord};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Element fields that are identifiers or flags rather than stats.
const NON_STAT_KEYS: &[&str] = &[
    "id",
    "element",
    "fixture",
    "opponent_team",
    "code",
    "team_code",
    "squad_number",
    "photo",
    "special",
    "in_dreamteam",
    "removed",
    "can_transact",
    "can_select",
    "was_home",
    "round",
    "now_cost",
    "cost_change_event",
    "cost_change_event_fall",
    "cost_change_start",
    "cost_change_start_fall",
    "value",
    "selected",
    "transfers_in",
    "transfers_out",
    "transfers_balance",
    "transfers_in_event",
    "transfers_out_event",
    "region",
];

fn de_lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_f64).unwrap_or(0.0))
}

fn de_lenient_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_f64))
}

fn stats_from(fields: &Map<String, Value>) -> StatBag {
    fields
        .iter()
        .filter(|(k, _)| !NON_STAT_KEYS.contains(&k.as_str()))
        .filter_map(|(k, v)| lenient_f64(v).map(|f| (k.clone(), f)))
        .collect()
}

#[derive(Debug, Deserialize)]
struct FplElement {
    id: u64,
    #[serde(default)]
    web_name: String,
    team: u32,
    element_type: u8,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    selected_by_percent: f64,
    #[serde(default)]
    now_cost: i64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    minutes: u32,
    #[serde(default, deserialize_with = "de_lenient_opt_f64")]
    ep_next: Option<f64>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct FplTeam {
    id: u32,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_opt_f64")]
    strength_defence_home: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_opt_f64")]
    strength_defence_away: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Bootstrap {
    #[serde(default)]
    elements: Vec<FplElement>,
    #[serde(default)]
    teams: Vec<FplTeam>,
}

#[derive(Debug, Deserialize)]
struct FplFixture {
    /// `null` while a fixture is unscheduled.
    event: Option<u16>,
    team_h: u32,
    team_a: u32,
    team_h_difficulty: i32,
    team_a_difficulty: i32,
}

#[derive(Debug, Deserialize)]
struct ElementSummary {
    #[serde(default)]
    history: Vec<Map<String, Value>>,
}

impl FplElement {
    fn into_record(self) -> Result<PlayerRecord> {
        let position = Position::from_fpl_element_type(self.element_type)?;
        let status = if self.status.is_empty() {
            AvailabilityStatus::Active
        } else {
            AvailabilityStatus::from_fpl_code(&self.status)?
        };
        Ok(PlayerRecord {
            id: PlayerId::new(self.id),
            name: self.web_name,
            team_id: TeamId::new(self.team),
            position,
            ownership_pct: self.selected_by_percent,
            price: self.now_cost,
            status,
            minutes_played: self.minutes,
            season_stats: stats_from(&self.rest),
            projected_points: self.ep_next,
        })
    }
}

impl From<FplTeam> for TeamRecord {
    fn from(team: FplTeam) -> Self {
        TeamRecord {
            id: TeamId::new(team.id),
            name: team.name,
            short_name: team.short_name,
            strength_defence_home: team.strength_defence_home,
            strength_defence_away: team.strength_defence_away,
        }
    }
}

/// Players and teams from a `bootstrap-static` payload.
///
/// Elements with an unknown `element_type` or status letter are skipped.
pub fn parse_bootstrap(json: &str) -> Result<(Vec<PlayerRecord>, Vec<TeamRecord>)> {
    let bootstrap: Bootstrap = serde_json::from_str(json)?;

    let mut players = Vec::with_capacity(bootstrap.elements.len());
    for element in bootstrap.elements {
        let id = element.id;
        match element.into_record() {
            Ok(record) => players.push(record),
            Err(e) => warn!(element = id, error = %e, "skipping FPL element"),
        }
    }
    let teams: Vec<TeamRecord> = bootstrap.teams.into_iter().map(TeamRecord::from).collect();

    debug!(players = players.len(), teams = teams.len(), "parsed FPL bootstrap");
    Ok((players, teams))
}

/// Scheduled fixtures from the `fixtures` endpoint; unscheduled ones are dropped.
pub fn parse_fixtures(json: &str) -> Result<Vec<FixtureRecord>> {
    let fixtures: Vec<FplFixture> = serde_json::from_str(json)?;
    Ok(fixtures
        .into_iter()
        .filter_map(|f| {
            let round = f.event?;
            Some(FixtureRecord {
                round_index: Round::new(round),
                home_team_id: TeamId::new(f.team_h),
                away_team_id: TeamId::new(f.team_a),
                home_difficulty_rank: f.team_h_difficulty,
                away_difficulty_rank: f.team_a_difficulty,
            })
        })
        .collect())
}

/// One player's per-round history from `element-summary/{id}`.
pub fn parse_element_history(player: PlayerId, json: &str) -> Result<Vec<GameLogEntry>> {
    let summary: ElementSummary = serde_json::from_str(json)?;
    let mut log: Vec<GameLogEntry> = summary
        .history
        .iter()
        .filter_map(|row| {
            let round = row.get("round").and_then(Value::as_u64)?;
            let minutes = row.get("minutes").and_then(lenient_f64).unwrap_or(0.0);
            Some(GameLogEntry {
                player_id: player,
                round_index: Round::new(u16::try_from(round).ok()?),
                minutes_played: minutes.max(0.0) as u32,
                stats: stats_from(row),
            })
        })
        .collect();
    log.sort_by_key(|g| g.round_index);
    Ok(log)
}

/// Assemble a soccer snapshot from FPL payloads.
pub fn snapshot_from_fpl(snapshot_id: &str, bootstrap: &str, fixtures: Option<&str>) -> Result<Snapshot> {
    let (players, teams) = parse_bootstrap(bootstrap)?;
    let fixtures = match fixtures {
        Some(json) => parse_fixtures(json)?,
        None => Vec::new(),
    };
    let mut snapshot = Snapshot::new(Sport::Soccer, snapshot_id);
    snapshot.players = players;
    snapshot.teams = teams;
    snapshot.fixtures = fixtures;
    Ok(snapshot)
}
