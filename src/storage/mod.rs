// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Durable key-value storage
//!
//! The store only needs two synchronous calls from its backend: read a slot,
//! overwrite a slot. Backends are injected so that tests can run against an
//! in-memory map and applications against the filesystem.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// A synchronous key-value facility holding UTF-8 text per key
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStorage {
    /// Read the raw value at `key`. `Ok(None)` means the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the whole value at `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
