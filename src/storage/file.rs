// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use crate::error::{PrefError, Result};

use super::SettingsStorage;

/// Filesystem storage: each key is a `<key>.json` file under one directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key` inside `dir`.
    pub fn path_for(dir: &Path, key: &str) -> PathBuf {
        dir.join(format!("{}.json", key))
    }

    /// Keys become file names, so they must stay inside the directory.
    pub fn check_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(PrefError::InvalidInput("storage key is empty".to_string()));
        }
        if key.contains('/') || key.contains('\\') || key.contains("..") || key.contains('\0') {
            return Err(PrefError::InvalidInput(format!(
                "storage key '{}' must not contain path separators",
                key
            )));
        }
        Ok(())
    }
}

impl SettingsStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::check_key(key)?;
        let path = Self::path_for(&self.dir, key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::check_key(key)?;
        // Ensure the directory exists.
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }
        let path = Self::path_for(&self.dir, key);
        std::fs::write(&path, value)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        assert_eq!(storage.get("settings").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path());
        storage.set("settings", r#"{"deviceId":"x"}"#).unwrap();

        assert_eq!(
            storage.get("settings").unwrap().as_deref(),
            Some(r#"{"deviceId":"x"}"#)
        );
        assert!(temp_dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut storage = FileStorage::new(&nested);
        storage.set("settings", "{}").unwrap();
        assert!(nested.join("settings.json").exists());
    }

    #[test]
    fn test_set_overwrites_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path());
        storage
            .set("settings", r#"{"deviceId":"a-much-longer-value"}"#)
            .unwrap();
        storage.set("settings", "{}").unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path());
        for key in ["", "../x", "a/b", "a\\b"] {
            assert!(storage.get(key).is_err(), "get {key:?}");
            assert!(storage.set(key, "{}").is_err(), "set {key:?}");
        }
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the directory should be.
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let mut storage = FileStorage::new(blocker.join("home"));
        let err = storage.set("settings", "{}").unwrap_err();
        assert!(matches!(err, PrefError::Io(_)));
    }
}
