// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, TriggerError};

/// Load a settings file from a given path.
///
/// This only performs TOML deserialization; it does **not** check that the
/// required settings are present. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| TriggerError::ConfigError(format!("cannot read config {path:?}: {e}")))?;
    let raw: RawSettings = toml::from_str(&contents)?;
    Ok(raw)
}

/// Overlay CLI values onto settings from a file; the CLI wins.
pub fn merge_cli(mut raw: RawSettings, args: &CliArgs) -> RawSettings {
    if let Some(ref regexp) = args.regexp {
        raw.regexp = Some(regexp.clone());
    }
    if let Some(ref exec) = args.exec {
        raw.exec = Some(exec.clone());
    }
    if let Some(ref file) = args.file {
        raw.file = Some(file.clone());
    }
    if args.log_level.is_some() {
        raw.log_level = args.log_level;
    }
    if args.scan_on.is_some() {
        raw.scan_on = args.scan_on;
    }
    if args.no_shell {
        raw.shell = Some(false);
    }
    raw
}

/// Resolve settings from the CLI (and the `--config` file, if given) and
/// validate them.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML, if a config file was named.
/// - Applies CLI overrides.
/// - Checks that the pattern compiles, the template has one `%s`, and the
///   file is readable.
pub fn load_and_validate(args: &CliArgs) -> Result<Settings> {
    let raw = match args.config {
        Some(ref path) => load_from_path(path)?,
        None => RawSettings::default(),
    };
    let settings = Settings::try_from(merge_cli(raw, args))?;
    Ok(settings)
}
