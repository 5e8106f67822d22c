use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One settings value as the platform stores it.
///
/// Anything that is not a boolean, an integer or a string is kept as [`SettingValue::Other`] so
/// that unknown keys never fail parsing; reading a known key of that shape is a type error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl SettingValue {
    fn kind(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "boolean",
            SettingValue::Int(_) => "integer",
            SettingValue::Text(_) => "string",
            SettingValue::Other(_) => "unsupported value",
        }
    }
}

/// Raw repository settings: flat, numbered keys (`enable1`, `branch1`, `approvers1`, `min1`, ...).
///
/// This is a *user-facing* model and is intentionally permissive: unknown keys are kept and
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawSettings {
    /// How the merge gate combines vetoes: `first`, `last` or `all` (default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veto_policy: Option<String>,

    /// Numbered rule fields and any other keys.
    #[serde(flatten)]
    pub fields: BTreeMap<String, SettingValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("setting '{key}' must be {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl SettingsError {
    pub fn key(&self) -> &str {
        match self {
            SettingsError::WrongType { key, .. } => key,
        }
    }
}

impl RawSettings {
    pub fn with(mut self, key: &str, value: SettingValue) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.fields.get(key)
    }

    /// Boolean field; absent reads as `None`.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, SettingsError> {
        match self.get(key) {
            None => Ok(None),
            Some(SettingValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(wrong_type(key, "a boolean", other)),
        }
    }

    /// String field; absent reads as `None`. The value is returned exactly as stored.
    pub fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match self.get(key) {
            None => Ok(None),
            Some(SettingValue::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(wrong_type(key, "a string", other)),
        }
    }

    /// Integer field. Form submissions carry numbers as strings, so a numeric string is
    /// accepted and an empty string reads as absent.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, SettingsError> {
        match self.get(key) {
            None => Ok(None),
            Some(SettingValue::Int(n)) => Ok(Some(*n)),
            Some(SettingValue::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(value @ SettingValue::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| wrong_type(key, "an integer", value)),
            Some(other) => Err(wrong_type(key, "an integer", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &'static str, found: &SettingValue) -> SettingsError {
    SettingsError::WrongType {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}
