//! Sport and position types shared by every provider adapter.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sports whose records pass through the engine.
///
/// Every record is tagged with exactly one sport so scoring code can dispatch
/// on the enum instead of on provider-specific strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Soccer,
    Basketball,
    Football,
}

impl Sport {
    /// All positions belonging to this sport, in display order.
    pub fn positions(&self) -> &'static [Position] {
        match self {
            Sport::Soccer => &[Position::GK, Position::DEF, Position::MID, Position::FWD],
            Sport::Basketball => &[
                Position::PG,
                Position::SG,
                Position::SF,
                Position::PF,
                Position::C,
            ],
            Sport::Football => &[Position::QB, Position::RB, Position::WR, Position::TE],
        }
    }

    /// Divisor converting provider minor price units into display units.
    ///
    /// FPL quotes `now_cost` in tenths of a million, so 125 displays as 12.5.
    pub fn price_scale(&self) -> f64 {
        match self {
            Sport::Soccer => 10.0,
            Sport::Basketball | Sport::Football => 1.0,
        }
    }

    /// Stat key holding fantasy points in this sport's stat bags.
    pub fn fantasy_points_metric(&self) -> &'static str {
        match self {
            Sport::Soccer => "total_points",
            Sport::Basketball | Sport::Football => "fantasy_points",
        }
    }

    /// Length of a regulation game in minutes.
    pub fn regulation_minutes(&self) -> f64 {
        match self {
            Sport::Soccer => 90.0,
            Sport::Basketball => 48.0,
            Sport::Football => 60.0,
        }
    }

    pub fn all() -> [Sport; 3] {
        [Sport::Soccer, Sport::Basketball, Sport::Football]
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sport::Soccer => "soccer",
            Sport::Basketball => "basketball",
            Sport::Football => "football",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Sport {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soccer" | "fpl" | "epl" => Ok(Sport::Soccer),
            "basketball" | "nba" => Ok(Sport::Basketball),
            "football" | "nfl" => Ok(Sport::Football),
            other => Err(EngineError::InvalidSport {
                sport: other.to_string(),
            }),
        }
    }
}

/// Player positions across all supported sports.
///
/// Names are unique across sports, so a bare position string identifies its
/// sport. Use [`Position::parse`] to accept provider aliases for one sport.
///
/// # Examples
///
/// ```rust
/// use fantasy_scout::{Position, Sport};
///
/// let mid: Position = "MID".parse().unwrap();
/// assert_eq!(mid.sport(), Sport::Soccer);
/// assert_eq!(Position::parse(Sport::Soccer, "GKP").unwrap(), Position::GK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    DEF,
    MID,
    FWD,
    PG,
    SG,
    SF,
    PF,
    C,
    QB,
    RB,
    WR,
    TE,
}

/// Positions that compete for the same role on a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PositionGroup {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Guard,
    Wing,
    Big,
    Passer,
    Rusher,
    PassCatcher,
}

impl Position {
    pub fn sport(&self) -> Sport {
        match self {
            Position::GK | Position::DEF | Position::MID | Position::FWD => Sport::Soccer,
            Position::PG | Position::SG | Position::SF | Position::PF | Position::C => {
                Sport::Basketball
            }
            Position::QB | Position::RB | Position::WR | Position::TE => Sport::Football,
        }
    }

    /// Role group used when looking for vacated minutes among teammates.
    pub fn group(&self) -> PositionGroup {
        match self {
            Position::GK => PositionGroup::Goalkeeper,
            Position::DEF => PositionGroup::Defender,
            Position::MID => PositionGroup::Midfielder,
            Position::FWD => PositionGroup::Forward,
            Position::PG | Position::SG => PositionGroup::Guard,
            Position::SF | Position::PF => PositionGroup::Wing,
            Position::C => PositionGroup::Big,
            Position::QB => PositionGroup::Passer,
            Position::RB => PositionGroup::Rusher,
            Position::WR | Position::TE => PositionGroup::PassCatcher,
        }
    }

    pub fn shares_role_with(&self, other: &Position) -> bool {
        self.group() == other.group()
    }

    /// Parse a position for a specific sport, accepting common provider aliases.
    pub fn parse(sport: Sport, s: &str) -> Result<Self, EngineError> {
        let upper = s.trim().to_uppercase();
        let aliased = match (sport, upper.as_str()) {
            (Sport::Soccer, "GKP" | "G" | "GOALKEEPER") => Some(Position::GK),
            (Sport::Soccer, "D" | "DEFENDER") => Some(Position::DEF),
            (Sport::Soccer, "M" | "MIDFIELDER") => Some(Position::MID),
            (Sport::Soccer, "F" | "FW" | "FORWARD") => Some(Position::FWD),
            (Sport::Basketball, "G") => Some(Position::PG),
            (Sport::Basketball, "F") => Some(Position::SF),
            (Sport::Basketball, "CENTER") => Some(Position::C),
            _ => None,
        };
        let position = match aliased {
            Some(p) => p,
            None => upper.parse()?,
        };
        if position.sport() != sport {
            return Err(EngineError::InvalidPosition {
                position: format!("{} ({})", s, sport),
            });
        }
        Ok(position)
    }

    /// FPL `element_type` (1..=4) to a soccer position.
    pub fn from_fpl_element_type(id: u8) -> Result<Self, EngineError> {
        match id {
            1 => Ok(Position::GK),
            2 => Ok(Position::DEF),
            3 => Ok(Position::MID),
            4 => Ok(Position::FWD),
            _ => Err(EngineError::InvalidPosition {
                position: id.to_string(),
            }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::GK => "GK",
            Position::DEF => "DEF",
            Position::MID => "MID",
            Position::FWD => "FWD",
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GK" => Ok(Position::GK),
            "DEF" => Ok(Position::DEF),
            "MID" => Ok(Position::MID),
            "FWD" => Ok(Position::FWD),
            "PG" => Ok(Position::PG),
            "SG" => Ok(Position::SG),
            "SF" => Ok(Position::SF),
            "PF" => Ok(Position::PF),
            "C" => Ok(Position::C),
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            _ => Err(EngineError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
