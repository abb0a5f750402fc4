use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use brick_engine::BrickEngine;
use brick_uci::{EngineConfig, Flow, UciSession};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Brick: a UCI chess engine. Speaks UCI on stdin/stdout, logs to stderr.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides the config file (RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {level:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level)?;
    info!(config = ?cli.config, "starting");

    let mut session = UciSession::new(BrickEngine::new(config.time), io::stdout());

    // UCI engines communicate via stdin/stdout.
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if session.handle_line(&line).context("failed to write stdout")? == Flow::Quit {
            return Ok(());
        }
    }

    debug!("stdin closed");
    session.stop_search();
    Ok(())
}
