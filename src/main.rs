//! Entry point: parse CLI, install logging and dispatch to command handlers.

use anyhow::{Context, Result};
use clap::Parser;
use fantasy_scout::{
    cli::{Commands, ScoutCli, SnapshotArgs},
    commands::{
        alternatives::{handle_alternatives, AlternativesParams},
        captains::{handle_captains, CaptainsParams},
        differentials::{handle_differentials, DifferentialsParams},
        flags::{handle_flags, FlagsParams},
        schedule::{handle_schedule, ScheduleParams},
        validate_config::handle_validate_config,
        CommandContext,
    },
    core::{default_cache_dir, LruRecommendationCache, RecommendationCache},
    EngineConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CACHE_CAPACITY: usize = 64;

fn init_tracing(cli: &ScoutCli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries results, logs go to stderr
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn context(input: &SnapshotArgs, config: EngineConfig, no_cache: bool) -> Result<CommandContext> {
    let cache: Box<dyn RecommendationCache> = if no_cache {
        Box::new(LruRecommendationCache::new(CACHE_CAPACITY))
    } else {
        Box::new(LruRecommendationCache::with_disk(CACHE_CAPACITY, default_cache_dir()))
    };
    CommandContext::load(&input.source(), config, cache)
        .with_context(|| format!("failed to load snapshot {}", input.snapshot.display()))
}

/// Run the CLI.
fn main() -> Result<()> {
    let cli = ScoutCli::parse();
    init_tracing(&cli);
    tracing::debug!("fantasy-scout v{}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::resolve(cli.config.clone()).context("invalid engine config")?;

    match cli.command {
        Commands::Alternatives {
            input,
            player,
            max_price,
            min_minutes,
            limit,
        } => {
            let ctx = context(&input, config, cli.no_cache)?;
            let params = AlternativesParams {
                player,
                max_price,
                min_minutes,
                limit: Some(limit),
            };
            handle_alternatives(&ctx, &params, input.json)?
        }

        Commands::Differentials {
            input,
            horizon,
            max_ownership,
            position,
            limit,
        } => {
            let ctx = context(&input, config, cli.no_cache)?;
            let params = DifferentialsParams {
                horizon,
                max_ownership,
                position,
                limit: Some(limit),
            };
            handle_differentials(&ctx, &params, input.json)?
        }

        Commands::Captains {
            input,
            round,
            scale,
            position,
            limit,
        } => {
            let ctx = context(&input, config, cli.no_cache)?;
            let params = CaptainsParams {
                round,
                scale,
                position,
                limit: Some(limit),
            };
            handle_captains(&ctx, &params, input.json)?
        }

        Commands::Flags {
            input,
            player,
            window,
            aggregation,
        } => {
            let ctx = context(&input, config, cli.no_cache)?;
            let params = FlagsParams {
                player,
                window,
                aggregation,
            };
            handle_flags(&ctx, &params, input.json)?
        }

        Commands::Schedule {
            input,
            team,
            from,
            horizon,
            scale,
        } => {
            let ctx = context(&input, config, cli.no_cache)?;
            let params = ScheduleParams {
                team,
                from,
                horizon,
                scale,
            };
            handle_schedule(&ctx, &params, input.json)?
        }

        Commands::ValidateConfig { json } => handle_validate_config(&config, json)?,
    }

    Ok(())
}
