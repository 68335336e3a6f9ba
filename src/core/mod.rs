//! Core utilities shared by command handlers.
//!
//! - `cache`: caller-owned recommendation cache

pub mod cache;

pub use cache::{default_cache_dir, LruRecommendationCache, RecommendationCache, RecommendationKey};
