// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for prefstore.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// prefstore - inspect and edit persisted settings
#[derive(Parser, Debug)]
#[command(name = "prefstore")]
#[command(version, about = "Inspect and edit persisted settings")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the settings slot (defaults to $PREFSTORE_HOME or ~/.prefstore)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show current settings (default when no command given)
    Show,

    /// Get a single value
    Get {
        /// Settings key (e.g., "deviceId")
        key: String,
    },

    /// Set a value; stored as a string unless --json is given
    Set {
        /// Settings key
        key: String,

        /// Value to set
        value: String,

        /// Parse the value as JSON instead of storing it as text
        #[arg(long)]
        json: bool,
    },

    /// Remove a key
    Unset {
        /// Settings key
        key: String,
    },

    /// Restore the defaults, or replace everything with the given object
    #[command(alias = "forget")]
    Reset {
        /// JSON object to store instead of the defaults
        #[arg(long = "with", value_name = "JSON")]
        with: Option<String>,
    },
}

/// Output format for command results
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Text,
    /// Compact JSON
    Json,
}
