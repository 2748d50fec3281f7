// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Ordered observer registry
//!
//! Callbacks run in registration order. A callback that panics is caught and
//! reported; the remaining callbacks still run and the failing one stays
//! registered.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::config::Settings;
use crate::error::PrefError;

/// Handle returned by `subscribe`; pass it to `unsubscribe` to stop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

type Callback = Box<dyn FnMut(&Settings)>;

#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a callback at the end of the list.
    pub(crate) fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Invoke a single callback, isolating a panic.
    pub(crate) fn notify_one(
        &mut self,
        id: SubscriptionId,
        value: &Settings,
    ) -> Option<PrefError> {
        let (_, callback) = self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id)?;
        invoke(id, callback, value).err()
    }

    /// Invoke every callback in order. Returns one error per failed callback.
    pub(crate) fn notify_all(&mut self, value: &Settings) -> Vec<PrefError> {
        let mut failures = Vec::new();
        for (id, callback) in self.entries.iter_mut() {
            if let Err(err) = invoke(*id, callback, value) {
                failures.push(err);
            }
        }
        failures
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("next_id", &self.next_id)
            .field(
                "ids",
                &self.entries.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn invoke(id: SubscriptionId, callback: &mut Callback, value: &Settings) -> Result<(), PrefError> {
    panic::catch_unwind(AssertUnwindSafe(|| callback(value))).map_err(|payload| {
        PrefError::SubscriberCallbackFailed {
            id: id.as_u64(),
            message: panic_message(payload.as_ref()),
        }
    })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "subscriber panicked".to_string()
    }
}
