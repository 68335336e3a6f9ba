//! CLI argument definitions and strongly-typed wrappers.

pub mod args;
pub mod types;

pub use args::{Commands, ScoutCli, SnapshotArgs};
