//! Test-only fixtures backed by temporary directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::io::paths::SettingsOptions;
use crate::store::SettingsStore;

/// A store whose program and config directories live in a temp dir.
///
/// The template is written to `<temp>/project_template.conf`; the config
/// file resolves to `<temp>/etc/project.conf` and does not exist yet.
pub struct TempStore {
    pub dir: TempDir,
    pub store: SettingsStore,
}

impl TempStore {
    pub fn with_template(template: &str) -> Self {
        Self::with_options(template, |_| {})
    }

    /// Like [`TempStore::with_template`], letting the caller adjust options
    /// (e.g. path rules) before the store is built.
    pub fn with_options(template: &str, adjust: impl FnOnce(&mut SettingsOptions)) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut options = temp_options(&dir);
        adjust(&mut options);
        fs::write(dir.path().join(&options.template_file_name), template)
            .expect("write template");
        let store = SettingsStore::new(&options).expect("store");
        Self { dir, store }
    }

    pub fn config_path(&self) -> PathBuf {
        self.store.paths().config_path.clone()
    }
}

/// Options pointing program and config directories into `dir`.
pub fn temp_options(dir: &TempDir) -> SettingsOptions {
    SettingsOptions {
        config_dir: Some(dir.path().join("etc").display().to_string()),
        program_dir: Some(dir.path().to_path_buf()),
        ..SettingsOptions::default()
    }
}
