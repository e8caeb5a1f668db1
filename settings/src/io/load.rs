//! Parse the config file into a [`Settings`] object.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_norway::Value;
use tracing::debug;

use crate::core::format::{PathRules, format_value};
use crate::core::table::Settings;
use crate::core::value::SettingValue;

/// Load and format every top-level setting in `path`.
pub fn load_settings(path: &Path, rules: &PathRules) -> Result<Settings> {
    debug!(path = %path.display(), "loading settings");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read settings {}", path.display()))?;
    let settings =
        parse_settings(&contents, rules).with_context(|| format!("parse {}", path.display()))?;
    debug!(count = settings.len(), "settings loaded");
    Ok(settings)
}

/// Parse YAML text into formatted settings.
///
/// The document must be a mapping with string keys. Nothing is returned
/// unless the whole document parses.
pub fn parse_settings(contents: &str, rules: &PathRules) -> Result<Settings> {
    let doc: Value = serde_norway::from_str(contents).context("parse settings yaml")?;
    let mapping = match doc {
        Value::Mapping(mapping) => mapping,
        Value::Null => bail!("settings document is empty"),
        other => bail!(
            "settings document must be a mapping, found {}",
            SettingValue::from(other).kind()
        ),
    };
    let mut values = BTreeMap::new();
    for (key, value) in mapping {
        let name = match key {
            Value::String(name) => name,
            other => {
                return Err(anyhow!(
                    "setting names must be strings, found {:?}",
                    SettingValue::from(other).to_string()
                ));
            }
        };
        let value = format_value(rules, &name, SettingValue::from(value));
        values.insert(name, value);
    }
    Ok(Settings::from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> PathRules {
        PathRules::new(["log_dir"], ["data_dir"]).expect("rules")
    }

    #[test]
    fn parses_and_formats_each_value() {
        let yaml = "\
# logging
log_dir: /var/log
data_dir: /srv/data/
enabled: yes
verbose: 'False'
port: '8080'
name: box
ratio: 0.5
";
        let settings = parse_settings(yaml, &rules()).expect("parse");
        assert_eq!(settings.str("log_dir"), Some("/var/log/"));
        assert_eq!(settings.str("data_dir"), Some("/srv/data"));
        assert_eq!(settings.bool("enabled"), Some(true));
        assert_eq!(settings.bool("verbose"), Some(false));
        assert_eq!(settings.int("port"), Some(8080));
        assert_eq!(settings.str("name"), Some("box"));
        assert_eq!(settings.get("ratio").map(SettingValue::kind), Some("number"));
    }

    #[test]
    fn nested_values_pass_through() {
        let yaml = "hosts:\n  - a\n  - b\nlimits:\n  cpu: 2\n";
        let settings = parse_settings(yaml, &rules()).expect("parse");
        assert_eq!(settings.get("hosts").map(SettingValue::kind), Some("sequence"));
        assert_eq!(settings.get("limits").map(SettingValue::kind), Some("mapping"));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(parse_settings("key: [unclosed\n", &rules()).is_err());
    }

    #[test]
    fn non_mapping_documents_are_rejected() {
        let err = parse_settings("- a\n- b\n", &rules()).expect_err("sequence");
        assert!(err.to_string().contains("mapping"));
        assert!(parse_settings("", &rules()).is_err());
        assert!(parse_settings("# only a comment\n", &rules()).is_err());
    }

    #[test]
    fn non_string_keys_are_rejected() {
        assert!(parse_settings("1: one\n", &rules()).is_err());
    }

    #[test]
    fn load_settings_reads_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("project.conf");
        fs::write(&path, "answer: 42\n").expect("write");
        let settings = load_settings(&path, &rules()).expect("load");
        assert_eq!(settings.int("answer"), Some(42));
    }
}
