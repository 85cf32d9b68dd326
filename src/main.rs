use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use talon_uci::UciEngine;

fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "talon starting");
    UciEngine::new().run().context("UCI loop failed")?;
    Ok(())
}
