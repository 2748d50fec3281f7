// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use crate::error::{PrefError, Result};
use crate::storage::FileStorage;
use crate::store::SettingsStore;

use super::SETTINGS_KEY;

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "PREFSTORE_HOME";

/// Get the prefstore home directory (~/.prefstore or $PREFSTORE_HOME).
pub fn prefstore_home() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".prefstore")
}

/// Where the store lives on disk and which slot it uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one JSON file per slot
    pub home: PathBuf,
    /// Slot name, `settings` unless overridden
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            home: prefstore_home(),
            key: SETTINGS_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolve the configuration. Priority: explicit override > env var > ~/.prefstore.
    pub fn resolve(home_override: Option<PathBuf>) -> Self {
        match home_override {
            Some(home) => Self::at(home),
            None => Self::default(),
        }
    }

    /// Configuration rooted at a specific directory.
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            key: SETTINGS_KEY.to_string(),
        }
    }

    /// Use a different slot name.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Path of the file backing the slot.
    pub fn slot_path(&self) -> PathBuf {
        FileStorage::path_for(&self.home, &self.key)
    }

    /// Reject configurations the file backend cannot serve.
    pub fn validate(&self) -> Result<()> {
        if self.home.as_os_str().is_empty() {
            return Err(PrefError::Config("home directory is empty".to_string()));
        }
        if self.home.exists() && !self.home.is_dir() {
            return Err(PrefError::Config(format!(
                "home '{}' is not a directory",
                self.home.display()
            )));
        }
        FileStorage::check_key(&self.key)
            .map_err(|err| PrefError::Config(format!("invalid slot name: {}", err)))
    }

    /// Open a file-backed store for this configuration.
    pub fn open_store(&self) -> Result<SettingsStore<FileStorage>> {
        self.validate()?;
        let storage = FileStorage::new(&self.home);
        Ok(SettingsStore::open_with_key(storage, self.key.clone()))
    }
}
