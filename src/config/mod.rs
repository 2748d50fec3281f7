// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for prefstore
//!
//! Defines the settings value and where it is stored.

pub mod home;
pub mod settings;

pub use home::*;
pub use settings::*;
