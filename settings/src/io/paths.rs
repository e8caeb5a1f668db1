//! Store options (`settings.toml`) and the file locations they resolve to.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use tracing::debug;

use crate::core::format::{PathRules, format_path};

pub const DEFAULT_CONFIG_DIR: &str = "/etc/";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "project.conf";
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = "project_template.conf";

/// Where the config file and its template live, and which parameters are paths.
///
/// Every field is optional in the TOML file; missing fields take the defaults
/// below.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SettingsOptions {
    /// Directory holding the config file. `None` means the program directory.
    pub config_dir: Option<String>,

    pub config_file_name: String,

    pub template_file_name: String,

    /// Directory holding the template. Defaults to the directory of the
    /// running executable.
    pub program_dir: Option<PathBuf>,

    /// Explicit template location, overriding `program_dir/template_file_name`.
    pub template_path: Option<PathBuf>,

    /// Parameters whose values always end with `/`.
    pub path_with_slash: Vec<String>,

    /// Parameters whose values never end with `/`.
    pub path_without_slash: Vec<String>,
}

impl Default for SettingsOptions {
    fn default() -> Self {
        Self {
            config_dir: Some(DEFAULT_CONFIG_DIR.to_string()),
            config_file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            template_file_name: DEFAULT_TEMPLATE_FILE_NAME.to_string(),
            program_dir: None,
            template_path: None,
            path_with_slash: Vec::new(),
            path_without_slash: Vec::new(),
        }
    }
}

impl SettingsOptions {
    pub fn validate(&self) -> Result<()> {
        validate_file_name("config_file_name", &self.config_file_name)?;
        if self.template_path.is_none() {
            validate_file_name("template_file_name", &self.template_file_name)?;
        }
        if matches!(&self.config_dir, Some(dir) if dir.trim().is_empty()) {
            bail!("config_dir must not be empty");
        }
        self.path_rules()?;
        Ok(())
    }

    pub fn path_rules(&self) -> Result<PathRules> {
        PathRules::new(
            self.path_with_slash.iter().cloned(),
            self.path_without_slash.iter().cloned(),
        )
    }

    /// Resolve concrete file locations.
    pub fn resolve(&self) -> Result<SettingsPaths> {
        self.validate()?;
        let program_dir = match &self.program_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        let config_dir = match &self.config_dir {
            Some(dir) => format_path(dir, true),
            None => {
                let dir = program_dir.to_str().ok_or_else(|| {
                    anyhow!("program directory is not valid UTF-8: {}", program_dir.display())
                })?;
                format_path(dir, true)
            }
        };
        let config_path = PathBuf::from(format!("{config_dir}{}", self.config_file_name));
        let template_path = match &self.template_path {
            Some(path) => path.clone(),
            None => program_dir.join(&self.template_file_name),
        };
        let paths = SettingsPaths {
            temp_path: temp_sibling(&config_path),
            config_dir,
            config_path,
            template_path,
        };
        debug!(
            config = %paths.config_path.display(),
            template = %paths.template_path.display(),
            "resolved settings paths"
        );
        Ok(paths)
    }
}

/// Resolved locations for one settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    /// Config directory, always ending with `/`.
    pub config_dir: String,
    pub config_path: PathBuf,
    pub template_path: PathBuf,
    /// Sibling of `config_path` used for atomic replacement.
    pub temp_path: PathBuf,
}

/// Load options from a TOML file.
///
/// If the file is missing, returns `SettingsOptions::default()`.
pub fn load_options(path: &Path) -> Result<SettingsOptions> {
    if !path.exists() {
        let options = SettingsOptions::default();
        options.validate()?;
        return Ok(options);
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let options: SettingsOptions =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    options.validate()?;
    Ok(options)
}

fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("{field} must not be empty");
    }
    if name.contains('/') {
        bail!("{field} must be a bare file name, got {name:?}");
    }
    Ok(())
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locate running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("executable path missing parent {}", exe.display()))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
