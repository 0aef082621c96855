//! Arena client binary.
//!
//! Composition root: loads content, registers effects, builds the runtime
//! and runs a scripted session.
//!
//! # Examples
//!
//! ```bash
//! # Embedded content, 60 ticks as fast as possible
//! cargo run -p arena-client
//!
//! # Custom trees, paced in real time, with AI tracing
//! ARENA_TREES=trees.ron ARENA_REALTIME=1 RUST_LOG=arena::ai=trace cargo run -p arena-client
//! ```

use anyhow::{Context, Result};
use arena_client::{ClientConfig, demo, effects};
use arena_runtime::{Runtime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(ticks = config.ticks, tick = ?config.tick, "Starting arena client");

    let runtime_config = RuntimeConfig {
        arena_config: config.arena_config().context("loading arena config")?,
        ..RuntimeConfig::default()
    };

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .effects(effects::registry())
        .abilities(config.abilities().context("loading abilities")?)
        .trees(config.trees().context("loading decision trees")?)
        .build()?;
    demo::populate(&mut runtime)?;

    let stats = demo::run(runtime, &config).await?;
    tracing::info!(
        ticks = stats.ticks,
        decision_errors = stats.decision_errors,
        "Session complete"
    );
    Ok(())
}
