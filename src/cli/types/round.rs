//! Scheduling round (gameweek / matchday / NFL week).

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for round indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Round(pub u16);

impl Round {
    pub fn new(round: u16) -> Self {
        Self(round)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The round `offset` rounds after this one.
    pub fn offset(&self, offset: u16) -> Self {
        Self(self.0.saturating_add(offset))
    }
}

impl Default for Round {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Round {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
