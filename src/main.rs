// src/main.rs

//! Washboard HTTP backend
//!
//! Serves campus laundry availability, Spotify playback control, and chess
//! game archives behind one small JSON API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use washboard::api::{self, AppState};
use washboard::config::Config;
use washboard::error::Result;

/// Washboard - campus utility backend
#[derive(Parser, Debug)]
#[command(name = "washboard", version, about = "Campus utility HTTP backend")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Washboard starting...");

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let bind_addr = config.server.bind_addr.clone();
    let state = Arc::new(AppState::new(config)?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("Listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
