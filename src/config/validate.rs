// src/config/validate.rs

use crate::config::model::{RawSettings, Settings, WatchTarget};
use crate::errors::{Result, TriggerError};
use crate::exec::CommandTemplate;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::DispatchMode;
use crate::watch::Matcher;

impl TryFrom<RawSettings> for Settings {
    type Error = TriggerError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_with(raw, &RealFileSystem)
    }
}

/// Validate raw settings, checking file access through `fs`.
pub fn validate_with(raw: RawSettings, fs: &dyn FileSystem) -> Result<Settings> {
    let pattern = require(raw.regexp, "--regexp")?;
    let exec = require(raw.exec, "--exec")?;
    let path = require(raw.file, "--file")?;

    let matcher = Matcher::new(&pattern)?;
    let command = CommandTemplate::parse(&exec).map_err(TriggerError::ConfigError)?;
    ensure_readable(fs, &path)?;

    Ok(Settings {
        target: WatchTarget {
            path,
            matcher,
            command,
        },
        log_level: raw.log_level,
        scan_on: raw.scan_on.unwrap_or_default(),
        dispatch_mode: DispatchMode::from_shell_flag(raw.shell.unwrap_or(true)),
    })
}

fn require<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| TriggerError::ConfigError(format!("missing required option {flag}")))
}

fn ensure_readable(fs: &dyn FileSystem, path: &std::path::Path) -> Result<()> {
    if !fs.is_file(path) {
        return Err(TriggerError::AccessError {
            path: path.to_path_buf(),
            reason: "not an existing regular file".to_string(),
        });
    }
    if !fs.is_readable(path) {
        return Err(TriggerError::AccessError {
            path: path.to_path_buf(),
            reason: "permission denied".to_string(),
        });
    }
    Ok(())
}
