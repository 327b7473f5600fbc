//! floor - terminal administration for the restaurant floor
//!
//! Every subcommand drives the same view-models a graphical front-end
//! would use and prints what they render.

mod cli;
mod commands;
mod render;

use std::process::ExitCode;

use clap::Parser;
use floor_client::{ClientConfig, FloorStore};
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before clap reads FLOOR_* variables
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    tracing::debug!(base_url = %config.base_url, timeout = config.timeout, "Configuration loaded");
    let store = FloorStore::connect(&config)?;

    match commands::run(&store, cli.command).await {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let notifications = store.notifications().active();
            if notifications.is_empty() {
                eprintln!("error: {e:#}");
            }
            for n in &notifications {
                eprintln!("{}", render::notification(n));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "floor=info,floor_client=info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
