//! Engine config validation report.

use crate::{cli::types::Sport, config::EngineConfig, error::Result};

/// Validate `config` and report what it defines.
pub fn handle_validate_config(config: &EngineConfig, as_json: bool) -> Result<()> {
    config.validate()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(config)?); // tarpaulin::skip
        return Ok(());
    }

    println!("✓ Engine config version {} is valid", config.version); // tarpaulin::skip
    for sport in Sport::all() {
        let profiles = sport
            .positions()
            .iter()
            .map(|p| {
                let features = config.weights.profile(*p).map(|f| f.len()).unwrap_or(0);
                format!("{}:{}", p, features)
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {:<10} {}", sport, profiles); // tarpaulin::skip
    }
    Ok(())
}
