//! Value formatting applied on load and before every write.
//!
//! Path classification is checked before boolean and integer coercion, so a
//! parameter declared as a path never turns into a `bool` or an `i64`.

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use tracing::warn;

use crate::core::value::SettingValue;

/// How a path parameter treats its trailing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    WithSlash,
    WithoutSlash,
}

/// The two disjoint sets of path parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRules {
    with_slash: BTreeSet<String>,
    without_slash: BTreeSet<String>,
}

impl PathRules {
    /// Build rules from the two name lists.
    ///
    /// Fails if a name appears in both lists.
    pub fn new<I, J, S>(with_slash: I, without_slash: J) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let with_slash: BTreeSet<String> = with_slash.into_iter().map(Into::into).collect();
        let without_slash: BTreeSet<String> = without_slash.into_iter().map(Into::into).collect();
        let overlap: Vec<&str> = with_slash
            .intersection(&without_slash)
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            bail!(
                "path parameters declared both with and without slash: {}",
                overlap.join(", ")
            );
        }
        Ok(Self {
            with_slash,
            without_slash,
        })
    }

    pub fn classify(&self, name: &str) -> Option<PathStyle> {
        if self.with_slash.contains(name) {
            Some(PathStyle::WithSlash)
        } else if self.without_slash.contains(name) {
            Some(PathStyle::WithoutSlash)
        } else {
            None
        }
    }
}

/// Add or strip a single trailing `/`. Empty paths stay empty.
pub fn format_path(path: &str, slash: bool) -> String {
    if path.is_empty() {
        return String::new();
    }
    match (slash, path.ends_with('/')) {
        (true, false) => format!("{path}/"),
        (false, true) => path[..path.len() - 1].to_string(),
        _ => path.to_string(),
    }
}

/// Produce the canonical value for parameter `name`.
pub fn format_value(rules: &PathRules, name: &str, value: SettingValue) -> SettingValue {
    if let Some(style) = rules.classify(name) {
        return match value.scalar_text() {
            Some(text) => SettingValue::Str(format_path(&text, style == PathStyle::WithSlash)),
            None => {
                warn!(name, kind = value.kind(), "path parameter is not a scalar; left as is");
                value
            }
        };
    }
    match value {
        SettingValue::Str(text) => coerce_str(text),
        other => other,
    }
}

fn coerce_str(text: String) -> SettingValue {
    match text.to_lowercase().as_str() {
        "yes" | "true" => return SettingValue::Bool(true),
        "no" | "false" => return SettingValue::Bool(false),
        _ => {}
    }
    match text.trim().parse::<i64>() {
        Ok(number) => SettingValue::Int(number),
        Err(_) => SettingValue::Str(text),
    }
}
