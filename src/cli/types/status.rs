//! Player availability status.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Availability designation attached to every player snapshot.
///
/// Providers use many spellings (`"a"`, `"Questionable"`, `"IR"`, `"GTD"`);
/// adapters collapse them into these four states. Anything that is not
/// [`AvailabilityStatus::Active`] counts as unavailable for opportunity detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    #[default]
    Active,
    Doubtful,
    Out,
    InjuredReserve,
}

impl AvailabilityStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityStatus::Active)
    }

    /// FPL single-letter status codes.
    ///
    /// `u` (unavailable/left club), `s` (suspended) and `n` (not eligible) are
    /// treated as out for the round.
    pub fn from_fpl_code(code: &str) -> Result<Self, EngineError> {
        match code.trim() {
            "a" => Ok(AvailabilityStatus::Active),
            "d" => Ok(AvailabilityStatus::Doubtful),
            "i" | "u" | "s" | "n" => Ok(AvailabilityStatus::Out),
            other => Err(EngineError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AvailabilityStatus::Active => "Active",
            AvailabilityStatus::Doubtful => "Doubtful",
            AvailabilityStatus::Out => "Out",
            AvailabilityStatus::InjuredReserve => "IR",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AvailabilityStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "active" | "healthy" | "available" | "probable" => Ok(AvailabilityStatus::Active),
            "doubtful" | "questionable" | "day-to-day" | "gtd" => {
                Ok(AvailabilityStatus::Doubtful)
            }
            "out" | "suspended" | "suspension" => Ok(AvailabilityStatus::Out),
            "injured-reserve" | "ir" | "injury-reserve" => Ok(AvailabilityStatus::InjuredReserve),
            _ => Err(EngineError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}
