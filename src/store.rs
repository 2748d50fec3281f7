// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Persistent settings store
//!
//! Holds the current [`Settings`] in memory and mirrors it into a durable
//! slot. The store is read once when opened; after that every `set`,
//! `update` and `reset` writes the full document back before subscribers
//! are notified.

use std::panic::{self, AssertUnwindSafe};

use crate::config::{Settings, SETTINGS_KEY};
use crate::error::{PrefError, Result};
use crate::storage::SettingsStorage;

mod subscribers;

pub use subscribers::SubscriptionId;
use subscribers::SubscriberRegistry;

type ErrorHandler = Box<dyn FnMut(&PrefError)>;

/// Observable settings value backed by a [`SettingsStorage`] slot
pub struct SettingsStore<S: SettingsStorage> {
    storage: S,
    key: String,
    current: Settings,
    subscribers: SubscriberRegistry,
    error_handler: Option<ErrorHandler>,
}

impl<S: SettingsStorage> SettingsStore<S> {
    /// Open the store on the `settings` slot.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, SETTINGS_KEY)
    }

    /// Open the store on an arbitrary slot. Never writes, never fails: an
    /// absent or malformed slot yields the default settings.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match read_initial(&storage, &key) {
            Ok(settings) => {
                tracing::debug!(key = %key, "loaded settings from storage");
                settings
            }
            Err(err) => {
                tracing::debug!(key = %key, error = %err, "using default settings");
                Settings::default()
            }
        };

        Self {
            storage,
            key,
            current,
            subscribers: SubscriberRegistry::new(),
            error_handler: None,
        }
    }

    /// Current value.
    pub fn get(&self) -> &Settings {
        &self.current
    }

    /// Name of the durable slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read-only view of the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the backing storage back to the caller.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Register `callback`. It is called right away with the current value,
    /// then after every mutation, in registration order.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Settings) + 'static,
    {
        let id = self.subscribers.add(Box::new(callback));
        if let Some(err) = self.subscribers.notify_one(id, &self.current) {
            self.report(&err);
        }
        id
    }

    /// Stop notifying a subscriber. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Route persistence and subscriber failures to the application.
    /// Without a handler they are only logged. A panic inside the handler is
    /// caught and logged; the handler stays installed.
    pub fn on_error<F>(&mut self, handler: F)
    where
        F: FnMut(&PrefError) + 'static,
    {
        self.error_handler = Some(Box::new(handler));
    }

    /// Replace the whole value.
    ///
    /// The new value is kept even when the write-back fails; in that case
    /// subscribers are still notified and `PersistenceWriteFailed` is returned.
    pub fn set(&mut self, value: Settings) -> Result<()> {
        self.current = value;

        let persisted = self.write_back();
        if let Err(err) = &persisted {
            self.report(err);
        }

        for err in self.subscribers.notify_all(&self.current) {
            self.report(&err);
        }

        persisted
    }

    /// Replace the value with `f(current)`.
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&Settings) -> Settings,
    {
        let next = f(&self.current);
        self.set(next)
    }

    /// Restore `value`, or the defaults when `None`. Always a full replace.
    pub fn reset(&mut self, value: Option<Settings>) -> Result<()> {
        self.set(value.unwrap_or_default())
    }

    fn write_back(&mut self) -> Result<()> {
        let json = self
            .current
            .to_json()
            .map_err(|err| PrefError::persistence(&self.key, err))?;
        self.storage
            .set(&self.key, &json)
            .map_err(|err| PrefError::persistence(&self.key, err))?;
        tracing::debug!(key = %self.key, bytes = json.len(), "settings written back");
        Ok(())
    }

    fn report(&mut self, err: &PrefError) {
        let Some(handler) = self.error_handler.as_mut() else {
            tracing::warn!(key = %self.key, error = %err, "settings store error");
            return;
        };
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler(err))) {
            tracing::error!(
                key = %self.key,
                error = %err,
                panic = %subscribers::panic_message(payload.as_ref()),
                "error handler panicked"
            );
        }
    }
}

impl<S: SettingsStorage + std::fmt::Debug> std::fmt::Debug for SettingsStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("current", &self.current)
            .field("subscribers", &self.subscribers)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

fn read_initial<S: SettingsStorage>(storage: &S, key: &str) -> Result<Settings> {
    let raw = storage
        .get(key)
        .map_err(|err| PrefError::InitialReadInvalid(err.to_string()))?
        .ok_or_else(|| PrefError::InitialReadInvalid(format!("slot '{}' is empty", key)))?;
    Settings::from_json(&raw).map_err(|err| PrefError::InitialReadInvalid(err.to_string()))
}
