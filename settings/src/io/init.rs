//! Bootstrap the config file from its template.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::paths::SettingsPaths;

/// Make sure the config file exists, copying the template if it does not.
///
/// An existing config file is never touched. Returns `true` when the
/// template was copied.
pub fn init_config(paths: &SettingsPaths) -> Result<bool> {
    if paths.config_path.is_file() {
        debug!(path = %paths.config_path.display(), "config file present");
        return Ok(false);
    }
    create_dir(Path::new(&paths.config_dir))?;
    fs::copy(&paths.template_path, &paths.config_path).with_context(|| {
        format!(
            "copy template {} to {}",
            paths.template_path.display(),
            paths.config_path.display()
        )
    })?;
    info!(
        template = %paths.template_path.display(),
        path = %paths.config_path.display(),
        "config file created from template"
    );
    Ok(true)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::paths::SettingsOptions;
    use std::io::ErrorKind;

    fn paths_in(dir: &Path) -> SettingsPaths {
        SettingsOptions {
            config_dir: Some(dir.join("etc").display().to_string()),
            program_dir: Some(dir.to_path_buf()),
            ..SettingsOptions::default()
        }
        .resolve()
        .expect("resolve")
    }

    #[test]
    fn copies_template_bytes_when_config_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = paths_in(temp.path());
        let template = b"# keep me\r\nkey:   value \n\n";
        fs::write(&paths.template_path, template).expect("write template");

        assert!(init_config(&paths).expect("init"));
        assert_eq!(fs::read(&paths.config_path).expect("read"), template);
    }

    #[test]
    fn leaves_existing_config_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = paths_in(temp.path());
        fs::write(&paths.template_path, "key: template\n").expect("write template");
        fs::create_dir_all(&paths.config_dir).expect("mkdir");
        fs::write(&paths.config_path, "key: mine\n").expect("write config");

        assert!(!init_config(&paths).expect("init"));
        assert_eq!(
            fs::read_to_string(&paths.config_path).expect("read"),
            "key: mine\n"
        );
    }

    #[test]
    fn missing_template_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = paths_in(temp.path());

        let err = init_config(&paths).expect_err("missing template");
        let not_found = err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == ErrorKind::NotFound)
        });
        assert!(not_found, "unexpected error: {err:#}");
        assert!(!paths.config_path.exists());
    }
}
