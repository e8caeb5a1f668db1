//! Typed setting values.

use std::fmt;

use serde::Serialize;
use serde_norway::Value;

/// A single configuration value after formatting.
///
/// Scalars that matter to consumers get their own variants. Anything else a
/// YAML document can hold (floats, nulls, sequences, mappings) is carried
/// through untouched in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Other(Value),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Textual form of a scalar value, used when a scalar has to be treated
    /// as a path. `Null` reads as the empty string. Sequences, mappings and
    /// tagged values have no textual form.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            SettingValue::Bool(value) => Some(value.to_string()),
            SettingValue::Int(value) => Some(value.to_string()),
            SettingValue::Str(value) => Some(value.clone()),
            SettingValue::Other(Value::Null) => Some(String::new()),
            SettingValue::Other(Value::Number(number)) => Some(number.to_string()),
            SettingValue::Other(_) => None,
        }
    }

    /// Short type name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "boolean",
            SettingValue::Int(_) => "integer",
            SettingValue::Str(_) => "string",
            SettingValue::Other(Value::Null) => "null",
            SettingValue::Other(Value::Number(_)) => "number",
            SettingValue::Other(Value::Sequence(_)) => "sequence",
            SettingValue::Other(Value::Mapping(_)) => "mapping",
            SettingValue::Other(_) => "value",
        }
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(value) => SettingValue::Bool(value),
            Value::String(value) => SettingValue::Str(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => SettingValue::Int(value),
                None => SettingValue::Other(Value::Number(number)),
            },
            other => SettingValue::Other(other),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(value) => write!(f, "{value}"),
            SettingValue::Int(value) => write!(f, "{value}"),
            SettingValue::Str(value) => f.write_str(value),
            SettingValue::Other(value) => {
                let rendered = serde_norway::to_string(value).map_err(|_| fmt::Error)?;
                f.write_str(rendered.trim_end())
            }
        }
    }
}
