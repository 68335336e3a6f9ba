//! ID types for provider players and teams.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for provider player IDs.
///
/// Keeps player IDs from being mixed up with team IDs, prices or minutes
/// when records from several providers flow through the same engine.
///
/// # Examples
///
/// ```rust
/// use fantasy_scout::PlayerId;
///
/// let player_id = PlayerId::new(355);
/// assert_eq!(player_id.as_u64(), 355);
/// assert_eq!(player_id.to_string(), "355");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new PlayerId from a u64 value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for provider team IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_parse_and_display() {
        let id: PlayerId = " 355 ".parse().unwrap();
        assert_eq!(id, PlayerId::new(355));
        assert_eq!(id.to_string(), "355");
        assert!("abc".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_ids_order_numerically() {
        let mut ids = vec![PlayerId::new(30), PlayerId::new(4), PlayerId::new(12)];
        ids.sort();
        assert_eq!(ids, vec![PlayerId::new(4), PlayerId::new(12), PlayerId::new(30)]);
    }

    #[test]
    fn test_team_id_serde_is_transparent() {
        let json = serde_json::to_string(&TeamId::new(14)).unwrap();
        assert_eq!(json, "14");
        let back: TeamId = serde_json::from_str("14").unwrap();
        assert_eq!(back.as_u32(), 14);
    }
}
