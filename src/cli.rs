// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::Parser;

use crate::types::{ScanTrigger, Verbosity};

/// One-line usage, printed for configuration errors that clap itself does
/// not catch (e.g. a required value missing from both CLI and config file).
pub const USAGE: &str =
    "Usage: trigger -r|--regexp=<regular expression> -e|--exec=<line to exec> -f|--file=<file>";

/// Command-line arguments for `trigger`.
///
/// The three required inputs may come from the CLI or from a TOML file given
/// with `--config`; the CLI wins when both are set.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "trigger",
    version,
    about = "Watch a file and run a command for each appended line matching a regular expression.",
    override_usage = "trigger -r|--regexp=<regular expression> -e|--exec=<line to exec> -f|--file=<file>",
    long_about = "Execute <line to exec> with the line matching <regular expression> in <file>.\n\
                  The command template must contain exactly one `%s`, replaced by the matched line."
)]
pub struct CliArgs {
    /// Regular expression searched for in each new line (unanchored).
    #[arg(short = 'r', long = "regexp", visible_alias = "re", value_name = "REGEX")]
    pub regexp: Option<String>,

    /// Command template to run for each matching line; `%s` is the line.
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    pub exec: Option<String>,

    /// File to watch for appended lines.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Diagnostic level (debug, info, warning, error, critical).
    ///
    /// If omitted, the config file, then `TRIGGER_LOG`, then `critical` is used.
    #[arg(
        short = 'd',
        long = "debug",
        visible_alias = "log-level",
        value_enum,
        value_name = "LEVEL"
    )]
    pub log_level: Option<Verbosity>,

    /// Optional TOML file supplying any of the settings above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Which notification starts a scan.
    #[arg(long, value_enum, value_name = "EVENT")]
    pub scan_on: Option<ScanTrigger>,

    /// Run the command directly instead of through `sh -c`; the matched line
    /// is passed as part of a single argument.
    ///
    /// The template is split on whitespace only. Quotes are not interpreted
    /// and are passed through as literal characters.
    #[arg(long)]
    pub no_shell: bool,

    /// Validate the settings, print them, and exit without watching.
    #[arg(long)]
    pub dry_run: bool,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
