// src/logging.rs

//! Logging setup for `trigger` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the level:
//! 1. `--debug` / `--log-level` on the CLI, or `log_level` in the config file
//! 2. `TRIGGER_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `critical`
//!
//! Logs are sent to STDERR so that triggered commands own stdout.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

use crate::types::Verbosity;

pub const LOG_ENV_VAR: &str = "TRIGGER_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(configured: Option<Verbosity>) -> Result<()> {
    let verbosity = resolve_verbosity(configured, std::env::var(LOG_ENV_VAR).ok().as_deref());

    fmt()
        .with_max_level(level_filter(verbosity))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(level = %verbosity, "logging enabled");
    Ok(())
}

/// Pick the effective verbosity; an unparsable env value is ignored.
pub fn resolve_verbosity(configured: Option<Verbosity>, env_value: Option<&str>) -> Verbosity {
    configured
        .or_else(|| env_value.and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}

/// Map a verbosity onto a `tracing` filter.
///
/// `tracing` has nothing above ERROR. The only critical conditions are the
/// fatal ones, which `main` reports on stderr directly, so `Critical`
/// silences the subscriber.
pub fn level_filter(verbosity: Verbosity) -> LevelFilter {
    match verbosity {
        Verbosity::Debug => LevelFilter::DEBUG,
        Verbosity::Info => LevelFilter::INFO,
        Verbosity::Warning => LevelFilter::WARN,
        Verbosity::Error => LevelFilter::ERROR,
        Verbosity::Critical => LevelFilter::OFF,
    }
}
