use std::io;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_cli=warn,tally_pricing=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = tally_cli::Config::load().context("Failed to load config")?;
    tracing::info!("Loaded pricing rules (output format {:?})", config.output.format);

    let stdin = io::stdin();
    tally_cli::run(&config, stdin.lock(), io::stdout().lock())?;
    Ok(())
}
