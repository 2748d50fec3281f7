// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The persisted settings value
//!
//! Settings are an open-ended JSON object. Only `deviceId` is recognized by
//! default; any other key written by a caller is carried along untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PrefError, Result};

/// Name of the durable slot holding the settings document.
pub const SETTINGS_KEY: &str = "settings";

/// Key of the device identifier field.
pub const DEVICE_ID_KEY: &str = "deviceId";

/// Settings document, stored as `{"deviceId": "..."}` plus whatever else was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Default for Settings {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert(DEVICE_ID_KEY.to_string(), Value::String(String::new()));
        Self(map)
    }
}

impl Settings {
    /// An object with no keys at all, not even `deviceId`.
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// Parse a stored document. Anything other than a JSON object is rejected.
    pub fn from_json(raw: &str) -> Result<Self> {
        Self::try_from(serde_json::from_str::<Value>(raw)?)
    }

    /// Compact JSON as written to the durable slot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Pretty JSON for display.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// The device identifier, if present and a string.
    pub fn device_id(&self) -> Option<&str> {
        self.0.get(DEVICE_ID_KEY).and_then(Value::as_str)
    }

    pub fn set_device_id(&mut self, id: impl Into<String>) {
        self.0
            .insert(DEVICE_ID_KEY.to_string(), Value::String(id.into()));
    }

    /// Builder form of [`Settings::set_device_id`].
    pub fn with_device_id(mut self, id: impl Into<String>) -> Self {
        self.set_device_id(id);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a field, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Settings {
    type Error = PrefError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PrefError::InvalidInput(format!(
                "settings must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.device_id(), Some(""));
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.to_json().unwrap(), r#"{"deviceId":""}"#);
    }

    #[test]
    fn test_from_json_keeps_unknown_fields() {
        let settings = Settings::from_json(r#"{"deviceId":"abc","theme":"dark","n":3}"#).unwrap();
        assert_eq!(settings.device_id(), Some("abc"));
        assert_eq!(settings.get("theme"), Some(&json!("dark")));
        assert_eq!(settings.get("n"), Some(&json!(3)));
    }

    #[test]
    fn test_from_json_missing_device_id() {
        let settings = Settings::from_json("{}").unwrap();
        assert!(settings.is_empty());
        assert_eq!(settings.device_id(), None);
        assert_eq!(settings.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        for raw in ["[1,2]", "\"x\"", "42", "null", "true"] {
            let err = Settings::from_json(raw).unwrap_err();
            assert!(matches!(err, PrefError::InvalidInput(_)), "{raw}");
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, PrefError::Json(_)));
    }

    #[test]
    fn test_device_id_non_string() {
        let settings = Settings::from_json(r#"{"deviceId":7}"#).unwrap();
        assert_eq!(settings.device_id(), None);
        assert_eq!(settings.get(DEVICE_ID_KEY), Some(&json!(7)));
    }

    #[test]
    fn test_with_device_id() {
        let settings = Settings::default().with_device_id("abc123");
        assert_eq!(settings.device_id(), Some("abc123"));
        assert_eq!(settings.to_json().unwrap(), r#"{"deviceId":"abc123"}"#);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut settings = Settings::default();
        assert_eq!(settings.insert("volume", json!(0.5)), None);
        assert_eq!(settings.insert("volume", json!(0.8)), Some(json!(0.5)));
        assert_eq!(settings.remove("volume"), Some(json!(0.8)));
        assert_eq!(settings.remove("volume"), None);
    }

    #[test]
    fn test_try_from_value() {
        let settings = Settings::try_from(json!({"deviceId": "x"})).unwrap();
        assert_eq!(settings.device_id(), Some("x"));
        assert!(Settings::try_from(json!([])).is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let settings = Settings::default().with_device_id("d");
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value, json!({"deviceId": "d"}));
        let back: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(back, settings);
    }
}
