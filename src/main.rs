// Copyright 2026 Namewatch Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_imports)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod cli;
mod config;
mod error;
mod events;
mod model;
mod poller;
mod render;
mod server;
mod tracker;

#[derive(Parser)]
#[command(
    name = "namewatch",
    about = "Namewatch — track a profile's display-name changes",
    version,
    after_help = "Run 'namewatch <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll a user-data endpoint and render updates in the terminal
    Watch {
        /// Endpoint serving the user-data JSON
        #[arg(long, default_value = "http://127.0.0.1:7700/api/user-data")]
        endpoint: String,
        /// Refresh period in milliseconds
        #[arg(long, default_value = "5000")]
        period_ms: u64,
    },
    /// Track a profile upstream and serve its snapshot on /api/user-data
    Serve {
        /// Port for the user-data API
        #[arg(long, default_value = "7700")]
        port: u16,
        /// Handle of the profile to track
        #[arg(long)]
        username: String,
        /// Seconds between upstream checks
        #[arg(long, default_value = "600")]
        interval_secs: u64,
        /// Upstream API base URL
        #[arg(long, default_value = config::DEFAULT_API_BASE)]
        api_base: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Watch {
            endpoint,
            period_ms,
        } => cli::watch_cmd::run(&endpoint, period_ms).await,
        Commands::Serve {
            port,
            username,
            interval_secs,
            api_base,
        } => cli::serve_cmd::run(port, &username, interval_secs, &api_base).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "namewatch", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
