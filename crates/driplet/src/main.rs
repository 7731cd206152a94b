// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Driplet - a testnet RGB asset faucet bot for Telegram.
//!
//! This is the binary entry point.

mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Driplet - a testnet RGB asset faucet bot for Telegram.
#[derive(Parser, Debug)]
#[command(name = "driplet", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the faucet bot (default).
    Serve,
    /// Load and validate the configuration, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match driplet_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            driplet_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::CheckConfig) => {
            println!("configuration ok");
        }
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run(config).await {
                eprintln!("driplet: {e}");
                std::process::exit(1);
            }
        }
    }
}
