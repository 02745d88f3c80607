//! vigil - CLI client for the vigil prayer feed.
//!
//! A thin wrapper over the vigil library crates: account lifecycle and
//! guest mode, organization onboarding, feed browsing, and posting.

mod backend;
mod cli;
mod commands;
mod config;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{account, feed, post};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let options = cli.service_options();

    match cli.command {
        Commands::Account(account_cmd) => account::handle(account_cmd, &options).await,
        Commands::Feed(args) => feed::run(args, &options).await,
        Commands::Post(args) => post::run(args, &options).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
