//! Type-safe wrappers and enums shared by the CLI and the engine.

pub mod ids;
pub mod position;
pub mod round;
pub mod status;

pub use ids::{PlayerId, TeamId};
pub use position::{Position, PositionGroup, Sport};
pub use round::Round;
pub use status::AvailabilityStatus;
