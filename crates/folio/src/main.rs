// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folio - a portfolio API with a built-in request simulator.
//!
//! This is the binary entry point for the server and the simulator client.

mod contacts;
mod send;
mod serve;
mod shell;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use folio_config::FolioConfig;

/// Folio - a portfolio API with a built-in request simulator.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default search path.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the portfolio API server.
    Serve,
    /// Launch the interactive request simulator.
    Shell,
    /// Send one simulated request and print the response.
    Send(send::SendArgs),
    /// List the API routes the simulator knows about.
    Routes,
    /// List stored contact submissions, newest first.
    Contacts {
        /// Show at most this many records.
        #[arg(long)]
        limit: Option<i64>,
        /// Print records as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> FolioConfig {
    let loaded = match path {
        Some(path) => folio_config::load_and_validate_path(path),
        None => folio_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            folio_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("folio: use --help for available commands");
        return;
    };

    let config = load_config(cli.config.as_ref());

    let result = match command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Shell => shell::run_shell(config).await,
        Commands::Send(args) => send::run_send(&config, args).await,
        Commands::Routes => {
            send::run_routes();
            Ok(())
        }
        Commands::Contacts { limit, json } => contacts::run_contacts(&config, limit, json).await,
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
