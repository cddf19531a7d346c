// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::exec::CommandTemplate;
use crate::types::{DispatchMode, ScanTrigger, Verbosity};
use crate::watch::Matcher;

/// Settings as read from a TOML file and/or the command line, before
/// validation.
///
/// ```toml
/// regexp = "FAIL"
/// exec = "notify-send %s"
/// file = "/var/log/app.log"
/// log_level = "info"
/// scan_on = "close-write"
/// shell = true
/// ```
///
/// Every field is optional here; required ones are checked by validation so
/// that the CLI can fill in what the file leaves out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// Regular expression searched for in each new line.
    #[serde(default, alias = "re")]
    pub regexp: Option<String>,

    /// Command template with exactly one `%s`.
    #[serde(default)]
    pub exec: Option<String>,

    /// File to watch.
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub log_level: Option<Verbosity>,

    #[serde(default)]
    pub scan_on: Option<ScanTrigger>,

    /// Run the command through the host shell (default `true`).
    #[serde(default)]
    pub shell: Option<bool>,
}

/// The immutable description of what to watch and what to do on a match.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub matcher: Matcher,
    pub command: CommandTemplate,
}

/// Validated startup settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub target: WatchTarget,
    /// `None` lets the logging layer fall back to `TRIGGER_LOG`.
    pub log_level: Option<Verbosity>,
    pub scan_on: ScanTrigger,
    pub dispatch_mode: DispatchMode,
}
