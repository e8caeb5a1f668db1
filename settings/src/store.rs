//! `SettingsStore`: bootstrap, load and write one config file.

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::core::format::PathRules;
use crate::core::table::Settings;
use crate::core::value::SettingValue;
use crate::io::init::init_config;
use crate::io::load::load_settings;
use crate::io::paths::{SettingsOptions, SettingsPaths};
use crate::io::write::write_settings;

/// A config file plus the path rules used to format its values.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    paths: SettingsPaths,
    rules: PathRules,
}

impl SettingsStore {
    pub fn new(options: &SettingsOptions) -> Result<Self> {
        let paths = options.resolve()?;
        let rules = options.path_rules()?;
        Ok(Self { paths, rules })
    }

    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    pub fn rules(&self) -> &PathRules {
        &self.rules
    }

    /// Create the config file from the template if it does not exist yet.
    ///
    /// Returns `true` if the template was copied.
    pub fn initialize(&self) -> Result<bool> {
        init_config(&self.paths).context("initialize settings")
    }

    pub fn load(&self) -> Result<Settings> {
        load_settings(&self.paths.config_path, &self.rules)
    }

    /// Replace the file's settings with `values`, keeping top-level comments.
    ///
    /// Settings loaded earlier are not updated; load again to see the result.
    pub fn write(&self, values: BTreeMap<String, SettingValue>) -> Result<()> {
        write_settings(
            &self.paths.config_path,
            &self.paths.temp_path,
            &self.rules,
            values,
        )
    }

    /// Load, change one setting, and write everything back.
    pub fn set(&self, name: &str, value: SettingValue) -> Result<()> {
        let mut values = self.load()?.into_values();
        values.insert(name.to_string(), value);
        self.write(values)
            .with_context(|| format!("update setting `{name}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempStore;
    use std::fs;

    #[test]
    fn set_updates_one_key_and_keeps_comments() {
        let fixture = TempStore::with_template("# listen port\nport: 80\nname: box\n");
        fixture.store.initialize().expect("init");

        fixture
            .store
            .set("port", SettingValue::from("8080"))
            .expect("set");

        let contents = fs::read_to_string(&fixture.store.paths().config_path).expect("read");
        assert_eq!(contents, "name: box\n\n# listen port\nport: 8080\n");
        let settings = fixture.store.load().expect("load");
        assert_eq!(settings.int("port"), Some(8080));
    }

    #[test]
    fn load_without_initialize_fails() {
        let fixture = TempStore::with_template("a: 1\n");
        assert!(fixture.store.load().is_err());
    }
}
