// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::Write;

use serde_json::Value;

use prefstore::cli::{Commands, OutputFormat};
use prefstore::config::Settings;
use prefstore::error::{PrefError, Result};
use prefstore::storage::SettingsStorage;
use prefstore::store::SettingsStore;

pub(super) fn run_command<S: SettingsStorage, W: Write>(
    command: Commands,
    format: &OutputFormat,
    store: &mut SettingsStore<S>,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Show => {
            let rendered = match format {
                OutputFormat::Text => store.get().to_json_pretty()?,
                OutputFormat::Json => store.get().to_json()?,
            };
            writeln!(out, "{}", rendered)?;
        }
        Commands::Get { key } => {
            let value = store
                .get()
                .get(&key)
                .ok_or_else(|| PrefError::InvalidInput(format!("Unknown setting: {}", key)))?;
            match (format, value) {
                (OutputFormat::Text, Value::String(s)) => writeln!(out, "{}", s)?,
                _ => writeln!(out, "{}", serde_json::to_string(value)?)?,
            }
        }
        Commands::Set { key, value, json } => {
            let parsed = parse_value(&value, json)?;
            store.update(|current| {
                let mut next = current.clone();
                next.insert(key.clone(), parsed);
                next
            })?;
            if *format == OutputFormat::Text {
                writeln!(out, "Setting '{}' updated.", key)?;
            }
        }
        Commands::Unset { key } => {
            if store.get().get(&key).is_none() {
                return Err(PrefError::InvalidInput(format!("Unknown setting: {}", key)));
            }
            store.update(|current| {
                let mut next = current.clone();
                next.remove(&key);
                next
            })?;
            if *format == OutputFormat::Text {
                writeln!(out, "Setting '{}' removed.", key)?;
            }
        }
        Commands::Reset { with } => {
            let replacement = with
                .as_deref()
                .map(Settings::from_json)
                .transpose()
                .map_err(|err| {
                    PrefError::InvalidInput(format!("--with must be a JSON object: {}", err))
                })?;
            store.reset(replacement)?;
            if *format == OutputFormat::Text {
                writeln!(out, "Settings reset.")?;
            }
        }
    }

    Ok(())
}

/// Message to print for a failed command. Persistence failures have already
/// gone through the store's error handler, so they are not repeated.
pub(super) fn failure_message(err: &PrefError) -> Option<String> {
    if err.is_persistence_failure() {
        return None;
    }
    Some(format!("Error: {}", err))
}

/// The raw text as a string, or parsed JSON when `json` is set.
pub(super) fn parse_value(raw: &str, json: bool) -> Result<Value> {
    if !json {
        return Ok(Value::String(raw.to_string()));
    }
    serde_json::from_str(raw)
        .map_err(|err| PrefError::InvalidInput(format!("--json value is not valid JSON: {}", err)))
}
