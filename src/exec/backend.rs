// src/exec/backend.rs

//! Pluggable dispatcher abstraction.
//!
//! The watch loop talks to a `Dispatcher` instead of spawning processes
//! itself. This makes it easy to swap in a recording fake in tests while
//! keeping the production process handling in [`command`].
//!
//! [`command`]: super::command

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::exec::command::{build_command, run_to_completion};
use crate::exec::template::CommandTemplate;
use crate::types::DispatchMode;

/// What happened to a single dispatched command.
///
/// Only ever logged: the outcome never changes the cursor or the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The process ran to completion. `None` if it was killed by a signal.
    Completed { exit_code: Option<i32> },
    /// The process could not be started, or waiting on it failed.
    Failed(String),
}

impl DispatchOutcome {
    pub fn success(&self) -> bool {
        matches!(self, DispatchOutcome::Completed { exit_code: Some(0) })
    }
}

/// Trait abstracting how a matched line is acted upon.
///
/// Implementations must not return before the triggered action finished:
/// the watch loop does not overlap dispatch with scanning.
pub trait Dispatcher: Send {
    fn dispatch<'a>(
        &'a mut self,
        template: &'a CommandTemplate,
        line: &'a str,
    ) -> Pin<Box<dyn Future<Output = DispatchOutcome> + Send + 'a>>;
}

/// Production dispatcher: runs the rendered command as an OS process and
/// waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellDispatcher {
    mode: DispatchMode,
}

impl ShellDispatcher {
    pub fn new(mode: DispatchMode) -> Self {
        Self { mode }
    }
}

impl Dispatcher for ShellDispatcher {
    fn dispatch<'a>(
        &'a mut self,
        template: &'a CommandTemplate,
        line: &'a str,
    ) -> Pin<Box<dyn Future<Output = DispatchOutcome> + Send + 'a>> {
        let mode = self.mode;
        Box::pin(async move {
            let cmd = match build_command(mode, template, line) {
                Ok(cmd) => cmd,
                Err(err) => return DispatchOutcome::Failed(format!("{err:#}")),
            };
            debug!(?mode, cmd = ?cmd.as_std(), "running triggered command");

            match run_to_completion(cmd).await {
                Ok(exit_code) => DispatchOutcome::Completed { exit_code },
                Err(err) => DispatchOutcome::Failed(format!("{err:#}")),
            }
        })
    }
}
