//! Write settings back to disk, keeping the comment above each top-level key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::comments::render_with_comments;
use crate::core::format::{PathRules, format_value};
use crate::core::value::SettingValue;

/// Replace the settings in `path` with `values`.
///
/// Values are formatted exactly as on load, serialized in key order, and the
/// comment blocks found in the current file are re-attached to their keys.
/// The new text goes to `temp_path` first and is then renamed over `path`.
pub fn write_settings(
    path: &Path,
    temp_path: &Path,
    rules: &PathRules,
    values: BTreeMap<String, SettingValue>,
) -> Result<()> {
    debug!(path = %path.display(), count = values.len(), "writing settings");
    let original =
        fs::read_to_string(path).with_context(|| format!("read settings {}", path.display()))?;
    let rendered = render_settings(&original, rules, values)?;
    write_atomic(path, temp_path, &rendered)
}

/// Produce the new file text without touching the filesystem.
pub fn render_settings(
    original: &str,
    rules: &PathRules,
    values: BTreeMap<String, SettingValue>,
) -> Result<String> {
    let formatted: BTreeMap<String, SettingValue> = values
        .into_iter()
        .map(|(name, value)| {
            let value = format_value(rules, &name, value);
            (name, value)
        })
        .collect();
    let serialized = serde_norway::to_string(&formatted).context("serialize settings yaml")?;
    Ok(render_with_comments(original, &serialized))
}

fn write_atomic(path: &Path, temp_path: &Path, contents: &str) -> Result<()> {
    fs::write(temp_path, contents)
        .with_context(|| format!("write temp settings {}", temp_path.display()))?;
    fs::rename(temp_path, path)
        .with_context(|| format!("replace settings {}", path.display()))?;
    Ok(())
}
