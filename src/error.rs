//! Error types for the fantasy recommendation engine

use thiserror::Error;


pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config serialization failed: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to parse integer: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Failed to parse decimal: {0}")]
    InvalidFloat(#[from] std::num::ParseFloatError),

    #[error("No weight table defined for position {position}")]
    MissingWeightTable { position: String },

    #[error("Weights for position {position} sum to {sum}, expected 1.0")]
    InvalidWeightSum { position: String, sum: f64 },

    #[error("Invalid fixture band table: {message}")]
    InvalidBandTable { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid availability status: {status}")]
    InvalidStatus { status: String },

    #[error("Invalid sport: {sport}")]
    InvalidSport { sport: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("Team not found: {id}")]
    TeamNotFound { id: String },

    #[error("Stats fetch failed for player {player_id}: {message}")]
    Fetch { player_id: String, message: String },
}

impl EngineError {
    /// Configuration errors are programming errors and abort the whole request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::MissingWeightTable { .. }
                | EngineError::InvalidWeightSum { .. }
                | EngineError::InvalidBandTable { .. }
                | EngineError::InvalidConfig { .. }
        )
    }
}
