//! Fixture difficulty banding and the schedule-difficulty view.
//!
//! Providers publish difficulty on different integer scales. Both scales map
//! onto the same five bands so captaincy scoring and schedule grids agree on
//! what "easy" means.

use crate::cli::types::{Round, Sport, TeamId};
use crate::error::{EngineError, Result};
use crate::model::{fixtures_for_team, FixtureRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete difficulty bands, hardest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    Brutal,
    Tough,
    Neutral,
    Good,
    Elite,
}

impl DifficultyBand {
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyBand::Brutal => "brutal",
            DifficultyBand::Tough => "tough",
            DifficultyBand::Neutral => "neutral",
            DifficultyBand::Good => "good",
            DifficultyBand::Elite => "elite",
        }
    }

    /// Display color (hex) for schedule grids.
    pub fn color(&self) -> &'static str {
        match self {
            DifficultyBand::Brutal => "#80072d",
            DifficultyBand::Tough => "#ff1751",
            DifficultyBand::Neutral => "#e7e7e7",
            DifficultyBand::Good => "#01fc7a",
            DifficultyBand::Elite => "#00875a",
        }
    }

    /// 1 (elite matchup) to 5 (brutal matchup).
    pub fn severity(&self) -> u8 {
        match self {
            DifficultyBand::Elite => 1,
            DifficultyBand::Good => 2,
            DifficultyBand::Neutral => 3,
            DifficultyBand::Tough => 4,
            DifficultyBand::Brutal => 5,
        }
    }
}

impl fmt::Display for DifficultyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Provider difficulty scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankScale {
    /// FPL fixture difficulty rating, 1 (easiest) to 5 (hardest).
    #[default]
    Fdr5,
    /// Defense-vs-position rank, 1 (stingiest) to 32 (most generous).
    Rank32,
}

impl RankScale {
    /// The scale a sport's providers publish.
    pub fn for_sport(sport: Sport) -> Self {
        match sport {
            Sport::Soccer => RankScale::Fdr5,
            Sport::Basketball | Sport::Football => RankScale::Rank32,
        }
    }
}

/// Inclusive rank interval mapped to a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThreshold {
    pub min_rank: i32,
    pub max_rank: i32,
    pub band: DifficultyBand,
}

const fn threshold(min_rank: i32, max_rank: i32, band: DifficultyBand) -> BandThreshold {
    BandThreshold {
        min_rank,
        max_rank,
        band,
    }
}

pub const FDR5_BANDS: [BandThreshold; 5] = [
    threshold(1, 1, DifficultyBand::Elite),
    threshold(2, 2, DifficultyBand::Good),
    threshold(3, 3, DifficultyBand::Neutral),
    threshold(4, 4, DifficultyBand::Tough),
    threshold(5, 5, DifficultyBand::Brutal),
];

pub const RANK32_BANDS: [BandThreshold; 5] = [
    threshold(1, 5, DifficultyBand::Brutal),
    threshold(6, 12, DifficultyBand::Tough),
    threshold(13, 19, DifficultyBand::Neutral),
    threshold(20, 27, DifficultyBand::Good),
    threshold(28, 32, DifficultyBand::Elite),
];

/// Band tables for both scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureBandConfig {
    pub fdr5: Vec<BandThreshold>,
    pub rank32: Vec<BandThreshold>,
}

impl Default for FixtureBandConfig {
    fn default() -> Self {
        Self {
            fdr5: FDR5_BANDS.to_vec(),
            rank32: RANK32_BANDS.to_vec(),
        }
    }
}

impl FixtureBandConfig {
    pub fn thresholds(&self, scale: RankScale) -> &[BandThreshold] {
        match scale {
            RankScale::Fdr5 => &self.fdr5,
            RankScale::Rank32 => &self.rank32,
        }
    }

    pub fn mapper(&self, scale: RankScale) -> Result<FixtureDifficultyMapper> {
        FixtureDifficultyMapper::new(self.thresholds(scale).to_vec())
    }

    pub fn validate(&self) -> Result<()> {
        self.mapper(RankScale::Fdr5)?;
        self.mapper(RankScale::Rank32)?;
        Ok(())
    }
}

/// Total `rank -> band` lookup over a validated threshold table.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDifficultyMapper {
    thresholds: Vec<BandThreshold>,
}

impl FixtureDifficultyMapper {
    /// Build a mapper; thresholds must be ordered, non-overlapping and contiguous.
    pub fn new(mut thresholds: Vec<BandThreshold>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(EngineError::InvalidBandTable {
                message: "no thresholds defined".to_string(),
            });
        }
        thresholds.sort_by_key(|t| t.min_rank);
        for t in &thresholds {
            if t.min_rank > t.max_rank {
                return Err(EngineError::InvalidBandTable {
                    message: format!("interval {}..={} is empty", t.min_rank, t.max_rank),
                });
            }
        }
        for pair in thresholds.windows(2) {
            if pair[1].min_rank != pair[0].max_rank + 1 {
                return Err(EngineError::InvalidBandTable {
                    message: format!(
                        "intervals {}..={} and {}..={} are not contiguous",
                        pair[0].min_rank, pair[0].max_rank, pair[1].min_rank, pair[1].max_rank
                    ),
                });
            }
        }
        Ok(Self { thresholds })
    }

    pub fn for_scale(scale: RankScale) -> Self {
        let thresholds = match scale {
            RankScale::Fdr5 => FDR5_BANDS.to_vec(),
            RankScale::Rank32 => RANK32_BANDS.to_vec(),
        };
        Self { thresholds }
    }

    pub fn min_rank(&self) -> i32 {
        self.thresholds[0].min_rank
    }

    pub fn max_rank(&self) -> i32 {
        self.thresholds[self.thresholds.len() - 1].max_rank
    }

    /// Out-of-range ranks clamp to the nearest defined rank.
    pub fn clamp_rank(&self, rank: i32) -> i32 {
        rank.clamp(self.min_rank(), self.max_rank())
    }

    pub fn band(&self, rank: i32) -> DifficultyBand {
        let rank = self.clamp_rank(rank);
        self.thresholds
            .iter()
            .find(|t| t.min_rank <= rank && rank <= t.max_rank)
            .map(|t| t.band)
            .unwrap_or(self.thresholds[0].band)
    }
}

/// One opponent in a schedule cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledOpponent {
    pub opponent: TeamId,
    pub is_home: bool,
    pub difficulty_rank: i32,
    pub band: DifficultyBand,
    pub color: &'static str,
}

/// A team's fixtures in one round: empty for a blank, two for a double.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCell {
    pub round_index: Round,
    pub opponents: Vec<ScheduledOpponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSchedule {
    pub team_id: TeamId,
    pub cells: Vec<ScheduleCell>,
    /// Mean clamped rank over every listed fixture; `None` when all rounds are blank.
    pub average_difficulty: Option<f64>,
}

/// Schedule grid for `team` over `horizon` rounds starting at `from`.
pub fn team_schedule(
    team: TeamId,
    fixtures: &[FixtureRecord],
    from: Round,
    horizon: u16,
    mapper: &FixtureDifficultyMapper,
) -> TeamSchedule {
    let cells: Vec<ScheduleCell> = (0..horizon)
        .map(|offset| {
            let round = from.offset(offset);
            let opponents = fixtures_for_team(fixtures, team, round)
                .into_iter()
                .map(|side| {
                    let band = mapper.band(side.difficulty_rank);
                    ScheduledOpponent {
                        opponent: side.opponent,
                        is_home: side.is_home,
                        difficulty_rank: side.difficulty_rank,
                        band,
                        color: band.color(),
                    }
                })
                .collect();
            ScheduleCell {
                round_index: round,
                opponents,
            }
        })
        .collect();

    let ranks: Vec<f64> = cells
        .iter()
        .flat_map(|c| c.opponents.iter())
        .map(|o| mapper.clamp_rank(o.difficulty_rank) as f64)
        .collect();
    let average_difficulty = if ranks.is_empty() {
        None
    } else {
        Some(ranks.iter().sum::<f64>() / ranks.len() as f64)
    };

    TeamSchedule {
        team_id: team,
        cells,
        average_difficulty,
    }
}
