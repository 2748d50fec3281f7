// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for prefstore
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for prefstore operations
#[derive(Error, Debug)]
pub enum PrefError {
    /// The durable slot was missing or unparseable when the store opened.
    /// Recovered by falling back to defaults; only ever logged.
    #[error("Initial read invalid: {0}")]
    InitialReadInvalid(String),

    /// Writing the current value back to durable storage failed
    #[error("Failed to persist '{key}': {source}")]
    PersistenceWriteFailed {
        key: String,
        #[source]
        source: Box<PrefError>,
    },

    /// A subscriber panicked while being notified
    #[error("Subscriber {id} failed: {message}")]
    SubscriberCallbackFailed { id: u64, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PrefError {
    /// Wrap a storage failure for the given slot key.
    pub fn persistence(key: impl Into<String>, source: PrefError) -> Self {
        PrefError::PersistenceWriteFailed {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error left the in-memory settings intact but stale on disk.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, PrefError::PersistenceWriteFailed { .. })
    }
}

/// Result type alias for prefstore operations
pub type Result<T> = std::result::Result<T, PrefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_read_invalid() {
        let err = PrefError::InitialReadInvalid("expected value at line 1".to_string());
        assert!(err.to_string().contains("Initial read invalid"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_persistence_write_failed_wraps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded");
        let err = PrefError::persistence("settings", io_err.into());
        assert!(err.is_persistence_failure());
        assert!(err.to_string().contains("'settings'"));
        assert!(err.to_string().contains("quota exceeded"));

        let source = std::error::Error::source(&err).expect("has source");
        assert!(source.to_string().contains("IO error"));
    }

    #[test]
    fn test_subscriber_callback_failed() {
        let err = PrefError::SubscriberCallbackFailed {
            id: 3,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Subscriber 3 failed: boom");
        assert!(!err.is_persistence_failure());
    }

    #[test]
    fn test_config_error() {
        let err = PrefError::Config("bad home".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PrefError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PrefError = json_err.into();
        assert!(matches!(err, PrefError::Json(_)));
    }

    #[test]
    fn test_debug() {
        let err = PrefError::InvalidInput("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidInput"));
    }

    #[test]
    fn test_result_error() {
        fn test_fn() -> Result<i32> {
            Err(PrefError::InvalidInput("test".to_string()))
        }

        assert!(test_fn().is_err());
    }
}
