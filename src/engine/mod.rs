//! Pure scoring components.
//!
//! Everything here is a deterministic function of its inputs and the
//! [`EngineConfig`](crate::config::EngineConfig) it is handed. Only
//! [`opportunity`] and [`flags`] call out, through a
//! [`StatsProvider`](crate::provider::StatsProvider).

pub mod captaincy;
pub mod differential;
pub mod fixture_difficulty;
pub mod flags;
pub mod normalize;
pub mod opportunity;
pub mod projection;
pub mod similarity;
pub mod trend;
pub mod weights;

pub use captaincy::{rank_captains, score_captaincy, CaptaincyCandidate, CaptaincyConfig};
pub use differential::{rank_differentials, score_differential, DifferentialCategory, DifferentialConfig, DifferentialInput};
pub use fixture_difficulty::{team_schedule, DifficultyBand, FixtureDifficultyMapper, RankScale, TeamSchedule};
pub use flags::{evaluate_flags, PlayerFlags};
pub use opportunity::{detect_opportunity, Opportunity, OpportunityConfig};
pub use projection::projected_points_per_fixture;
pub use similarity::{cosine_similarity, find_alternatives, SimilarityMatch, SimilarityQuery};
pub use trend::{classify_trend, detect_surge, Aggregation, SurgeConfig, Trend, TrendConfig};
pub use weights::{FeatureScaling, FeatureWeight, WeightTables};
