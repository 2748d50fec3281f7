// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! prefstore - persisted, observable settings.
//!
//! A [`SettingsStore`] keeps one settings document in memory and mirrors every
//! change into a durable key-value slot (`settings`). It is read once when
//! opened, falls back to `{"deviceId": ""}` when the slot is empty or
//! malformed, and notifies subscribers on every mutation.
//!
//! Layout:
//! - `config`: the [`Settings`] value and home directory resolution
//! - `storage`: the injected key-value backend (memory or files)
//! - `store`: the store itself and its subscriber registry
//! - `cli`: arguments for the `prefstore` binary

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{Settings, StoreConfig, SETTINGS_KEY};
pub use error::{PrefError, Result};
pub use storage::{FileStorage, MemoryStorage, SettingsStorage};
pub use store::{SettingsStore, SubscriptionId};
