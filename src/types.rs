// src/types.rs

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Which notification kind starts a scan of the watched file.
///
/// - `CloseWrite`: a writer closed its handle after writing (default). This is
///   the only kind that guarantees the write is complete and visible.
/// - `Modify`: also scan on data-modification notifications. Useful on
///   platforms whose watcher backend never reports close-after-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScanTrigger {
    #[default]
    #[serde(alias = "close_write")]
    CloseWrite,
    Modify,
}

/// How a rendered command reaches the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Substitute the line into the template and hand the result to the host
    /// shell. No escaping is applied, so shell metacharacters in the line are
    /// interpreted by the shell.
    #[default]
    Shell,
    /// Split the template into words and run them directly; the line is
    /// substituted inside a single argument and never seen by a shell.
    Argv,
}

impl DispatchMode {
    pub fn from_shell_flag(use_shell: bool) -> Self {
        if use_shell {
            DispatchMode::Shell
        } else {
            DispatchMode::Argv
        }
    }
}

/// Diagnostic verbosity, named after the usual syslog-style levels
/// (`warn` and `fatal` are accepted as aliases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Debug,
    Info,
    #[value(alias = "warn")]
    #[serde(alias = "warn")]
    Warning,
    Error,
    #[default]
    #[value(alias = "fatal")]
    #[serde(alias = "fatal")]
    Critical,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Verbosity::Debug),
            "info" => Ok(Verbosity::Info),
            "warning" | "warn" => Ok(Verbosity::Warning),
            "error" => Ok(Verbosity::Error),
            "critical" | "fatal" => Ok(Verbosity::Critical),
            other => Err(format!(
                "invalid log level: {other} (expected debug, info, warning, error or critical)"
            )),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Debug => "debug",
            Verbosity::Info => "info",
            Verbosity::Warning => "warning",
            Verbosity::Error => "error",
            Verbosity::Critical => "critical",
        };
        f.write_str(name)
    }
}
