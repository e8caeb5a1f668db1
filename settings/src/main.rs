//! Inspect and edit a comment-preserving YAML config file.
//!
//! The config file (`/etc/project.conf` by default) is created from its
//! template on first use. `set` rewrites the whole file but keeps the comment
//! block above every top-level key.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use settings::io::paths::{SettingsOptions, load_options};
use settings::{SettingValue, Settings, SettingsStore, exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "settings",
    version,
    about = "Comment-preserving YAML settings store"
)]
struct Cli {
    #[command(flatten)]
    location: LocationArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct LocationArgs {
    /// TOML file with store options (missing file means defaults).
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Directory holding the config file.
    #[arg(long, global = true)]
    config_dir: Option<String>,

    /// Config file name inside the config directory.
    #[arg(long, global = true)]
    config_file: Option<String>,

    /// Template copied into place when the config file is missing.
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Parameter whose value always ends with `/` (repeatable).
    #[arg(long = "with-slash", global = true, value_name = "NAME")]
    with_slash: Vec<String>,

    /// Parameter whose value never ends with `/` (repeatable).
    #[arg(long = "without-slash", global = true, value_name = "NAME")]
    without_slash: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the config file from the template if missing; print its path.
    Init,
    /// Print every setting.
    Show {
        /// Print a JSON object instead of `key: value` lines.
        #[arg(long)]
        json: bool,
    },
    /// Print one setting.
    Get { name: String },
    /// Change one setting, keeping the file's comments.
    Set { name: String, value: String },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let options = build_options(&cli.location)?;
    let store = SettingsStore::new(&options)?;
    store.initialize()?;
    match cli.command {
        Command::Init => {
            println!("{}", store.paths().config_path.display());
            Ok(exit_codes::OK)
        }
        Command::Show { json } => cmd_show(&store.load()?, json),
        Command::Get { name } => cmd_get(&store.load()?, &name),
        Command::Set { name, value } => {
            store.set(&name, SettingValue::from(value))?;
            Ok(exit_codes::OK)
        }
    }
}

/// Start from the options file (or defaults) and apply CLI overrides.
fn build_options(args: &LocationArgs) -> Result<SettingsOptions> {
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None => SettingsOptions::default(),
    };
    if let Some(dir) = &args.config_dir {
        options.config_dir = Some(dir.clone());
    }
    if let Some(name) = &args.config_file {
        options.config_file_name = name.clone();
    }
    if let Some(template) = &args.template {
        options.template_path = Some(template.clone());
    }
    options.path_with_slash.extend(args.with_slash.iter().cloned());
    options
        .path_without_slash
        .extend(args.without_slash.iter().cloned());
    options.validate()?;
    Ok(options)
}

fn cmd_show(settings: &Settings, json: bool) -> Result<i32> {
    if json {
        let payload = serde_json::to_string_pretty(settings).context("serialize json")?;
        println!("{payload}");
    } else {
        for (name, value) in settings.iter() {
            println!("{name}: {value}");
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_get(settings: &Settings, name: &str) -> Result<i32> {
    match settings.get(name) {
        Some(value) => {
            println!("{value}");
            Ok(exit_codes::OK)
        }
        None => {
            eprintln!("setting `{name}` is not defined");
            Ok(exit_codes::MISSING)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set() {
        let cli = Cli::parse_from(["settings", "set", "port", "8080"]);
        assert!(matches!(
            cli.command,
            Command::Set { ref name, ref value } if name == "port" && value == "8080"
        ));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "settings",
            "show",
            "--json",
            "--config-dir",
            "/srv",
            "--with-slash",
            "log_dir",
            "--with-slash",
            "cache_dir",
        ]);
        assert!(matches!(cli.command, Command::Show { json: true }));
        assert_eq!(cli.location.config_dir.as_deref(), Some("/srv"));
        assert_eq!(cli.location.with_slash, vec!["log_dir", "cache_dir"]);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let args = LocationArgs {
            config_file: Some("app.yaml".to_string()),
            without_slash: vec!["data_dir".to_string()],
            ..LocationArgs::default()
        };
        let options = build_options(&args).expect("options");
        assert_eq!(options.config_dir.as_deref(), Some("/etc/"));
        assert_eq!(options.config_file_name, "app.yaml");
        assert_eq!(options.path_without_slash, vec!["data_dir".to_string()]);
    }

    #[test]
    fn conflicting_slash_flags_are_rejected() {
        let args = LocationArgs {
            with_slash: vec!["dir".to_string()],
            without_slash: vec!["dir".to_string()],
            ..LocationArgs::default()
        };
        assert!(build_options(&args).is_err());
    }
}
