use std::path::{Path, PathBuf};
use std::sync::Arc;

use trigger::config::{RawSettings, WatchTarget};
use trigger::exec::CommandTemplate;
use trigger::watch::Matcher;

/// Builder for `WatchTarget` to simplify test setup.
pub struct WatchTargetBuilder {
    path: PathBuf,
    pattern: String,
    command: String,
}

impl WatchTargetBuilder {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pattern: ".".to_string(),
            command: "echo %s".to_string(),
        }
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    pub fn command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }

    pub fn build(self) -> WatchTarget {
        WatchTarget {
            path: self.path,
            matcher: Matcher::new(&self.pattern).expect("Invalid pattern in builder"),
            command: CommandTemplate::parse(&self.command).expect("Invalid template in builder"),
        }
    }

    pub fn build_shared(self) -> Arc<WatchTarget> {
        Arc::new(self.build())
    }
}

/// Builder for `RawSettings`, as the CLI or a config file would produce.
#[derive(Default)]
pub struct RawSettingsBuilder {
    raw: RawSettings,
}

impl RawSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regexp(mut self, pattern: &str) -> Self {
        self.raw.regexp = Some(pattern.to_string());
        self
    }

    pub fn exec(mut self, command: &str) -> Self {
        self.raw.exec = Some(command.to_string());
        self
    }

    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn shell(mut self, val: bool) -> Self {
        self.raw.shell = Some(val);
        self
    }

    pub fn build(self) -> RawSettings {
        self.raw
    }
}
