// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! prefstore - inspect and edit persisted settings
//!
//! Entry point for the prefstore CLI application.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use prefstore::cli::{Cli, Commands};
use prefstore::config::{Settings, StoreConfig};
use prefstore::error::Result;

#[path = "main/cli_commands.rs"]
mod cli_commands;

use cli_commands::{failure_message, run_command};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on store diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        if let Ok(parsed) = format!("prefstore={}", level).parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(message) = failure_message(&err) {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig::resolve(cli.home.clone());
    tracing::debug!(slot = %config.slot_path().display(), "opening settings store");

    let mut store = config.open_store()?;
    store.on_error(|err| tracing::error!(error = %err, "settings store error"));
    store.subscribe(|settings: &Settings| {
        tracing::debug!(keys = settings.len(), "settings changed");
    });

    let command = cli.command.unwrap_or(Commands::Show);
    let mut stdout = io::stdout().lock();
    run_command(command, &cli.format, &mut store, &mut stdout)
}
