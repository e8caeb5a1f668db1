//! The loaded settings object.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::core::value::SettingValue;

/// Formatted settings keyed by parameter name.
///
/// Returned by `SettingsStore::load` and handed to whatever needs
/// configuration. Several instances can live side by side in one process.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl Settings {
    pub fn from_values(values: BTreeMap<String, SettingValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(SettingValue::as_bool)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(SettingValue::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(SettingValue::as_str)
    }

    pub fn require_bool(&self, name: &str) -> Result<bool> {
        self.require(name, "boolean", SettingValue::as_bool)
    }

    pub fn require_int(&self, name: &str) -> Result<i64> {
        self.require(name, "integer", SettingValue::as_int)
    }

    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.require(name, "string", SettingValue::as_str)
    }

    fn require<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        extract: impl FnOnce(&'a SettingValue) -> Option<T>,
    ) -> Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| anyhow!("setting `{name}` is not defined"))?;
        extract(value).ok_or_else(|| {
            anyhow!(
                "setting `{name}` has type {}, expected {expected}",
                value.kind()
            )
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Copy of the underlying map, e.g. to modify and pass to a write.
    pub fn to_values(&self) -> BTreeMap<String, SettingValue> {
        self.values.clone()
    }

    pub fn into_values(self) -> BTreeMap<String, SettingValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        let mut values = BTreeMap::new();
        values.insert("debug".to_string(), SettingValue::Bool(true));
        values.insert("port".to_string(), SettingValue::Int(8080));
        values.insert("name".to_string(), SettingValue::from("box"));
        Settings::from_values(values)
    }

    #[test]
    fn typed_lookups_match_variant() {
        let settings = sample();
        assert_eq!(settings.bool("debug"), Some(true));
        assert_eq!(settings.int("port"), Some(8080));
        assert_eq!(settings.str("name"), Some("box"));
        assert_eq!(settings.int("debug"), None);
        assert_eq!(settings.get("missing"), None);
    }

    #[test]
    fn require_reports_missing_and_mismatched() {
        let settings = sample();
        assert_eq!(settings.require_int("port").expect("port"), 8080);
        let missing = settings.require_str("missing").expect_err("missing");
        assert!(missing.to_string().contains("not defined"));
        let mismatched = settings.require_bool("port").expect_err("mismatch");
        assert_eq!(
            mismatched.to_string(),
            "setting `port` has type integer, expected boolean"
        );
    }

    #[test]
    fn iter_is_key_ordered() {
        let settings = sample();
        let names: Vec<&str> = settings.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["debug", "name", "port"]);
    }
}
