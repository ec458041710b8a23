//! Configuration value types.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Model used when no file names one.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Well-known keys.
pub const KEY_API_KEY: &str = "api_key";
pub const KEY_MODEL: &str = "model";
pub const KEY_SCOPES: &str = "scopes";

/// A single top-level configuration value.
///
/// Files are flat: values are strings, null, or string lists. Anything else
/// a file contains (numbers, booleans, mixed lists, nested mappings) is kept
/// verbatim in [`ConfigValue::Other`] without further validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    String(String),
    List(Vec<String>),
    Other(Value),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigValue::Null,
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => {
                if items.iter().all(Value::is_string) {
                    ConfigValue::List(
                        items
                            .into_iter()
                            .filter_map(|v| match v {
                                Value::String(s) => Some(s),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    ConfigValue::Other(Value::Sequence(items))
                }
            }
            other => ConfigValue::Other(other),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        ConfigValue::List(items)
    }
}

/// A flat mapping from canonical key to value.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Canonical form of a key.
///
/// A key may arrive in symbolic form (`:model`, as Ruby-written YAML stores
/// symbol keys) or textual form (`model`); both map to `model`.
pub fn normalize_key(key: &str) -> &str {
    key.strip_prefix(':').unwrap_or(key)
}

/// Canonical key for a YAML mapping key, if it has a scalar form.
pub fn key_from_yaml(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(normalize_key(s).to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Whether a YAML key is spelled in symbolic form (`:model`).
pub fn is_symbolic_key(key: &Value) -> bool {
    matches!(key, Value::String(s) if s.starts_with(':'))
}

/// Typed view of the well-known keys.
///
/// `Settings::default()` is also the document written by `setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub scopes: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            scopes: None,
        }
    }
}

impl Settings {
    /// Read the well-known keys out of a resolved map.
    ///
    /// Missing or wrongly-typed values fall back to the defaults.
    pub fn from_map(map: &ConfigMap) -> Self {
        let api_key = map
            .get(KEY_API_KEY)
            .and_then(ConfigValue::as_str)
            .map(str::to_string);
        let model = map
            .get(KEY_MODEL)
            .and_then(ConfigValue::as_str)
            .unwrap_or(DEFAULT_MODEL)
            .to_string();
        let scopes = map
            .get(KEY_SCOPES)
            .and_then(ConfigValue::as_list)
            .map(<[String]>::to_vec);

        Self {
            api_key,
            model,
            scopes,
        }
    }

    /// The default document as YAML text.
    pub fn default_yaml() -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Self::default())
    }
}
