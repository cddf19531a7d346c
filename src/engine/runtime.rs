// src/engine/runtime.rs

use std::collections::VecDeque;
use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::errors::{Result, TriggerError};
use crate::exec::{DispatchOutcome, Dispatcher};
use crate::watch::WatchEvent;

use super::core::WatchCore;
use super::{CoreCommand, CoreStep, MatchEvent};

/// Drives the watch core in response to `WatchEvent`s, and delegates
/// running triggered commands to a `Dispatcher`.
///
/// This is a pure IO shell around `WatchCore`, which contains all the scan
/// semantics. Events are handled strictly one at a time: the next event is
/// not received until every dispatch of the current scan has returned.
pub struct WatchLoop<D: Dispatcher> {
    core: WatchCore,
    event_rx: mpsc::Receiver<WatchEvent>,
    dispatcher: D,
}

impl<D: Dispatcher> fmt::Debug for WatchLoop<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchLoop")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<D: Dispatcher> WatchLoop<D> {
    pub fn new(core: WatchCore, event_rx: mpsc::Receiver<WatchEvent>, dispatcher: D) -> Self {
        Self {
            core,
            event_rx,
            dispatcher,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `WatchEvent`s from `event_rx`.
    /// - Feeds them into the core.
    /// - Executes the commands returned by the core (dispatch, commit, exit).
    ///
    /// Returns the core when the loop ends cleanly (channel closed or
    /// shutdown requested), and an error if the watcher failed.
    pub async fn run(mut self) -> Result<WatchCore> {
        info!(file = ?self.core.target().path, "watch loop started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("watch event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "watch loop received event");

            let step = self.core.step(event);
            if !self.execute(step).await? {
                info!("core requested exit; stopping watch loop");
                break;
            }
        }

        info!(offset = self.core.cursor_offset(), "watch loop exiting");
        Ok(self.core)
    }

    /// Execute the commands of one step, plus any follow-up steps produced
    /// by committing the scan. Returns whether the loop should keep running.
    async fn execute(&mut self, step: CoreStep) -> Result<bool> {
        let mut keep_running = step.keep_running;
        let mut pending: VecDeque<CoreCommand> = step.commands.into();

        while let Some(command) = pending.pop_front() {
            match command {
                CoreCommand::Dispatch(matched) => self.dispatch(matched).await,
                CoreCommand::CommitCursor(offset) => {
                    let next = self.core.commit_scan(offset);
                    keep_running &= next.keep_running;
                    pending.extend(next.commands);
                }
                CoreCommand::RequestExit => {
                    info!("shutdown requested");
                }
                CoreCommand::Abort(reason) => {
                    return Err(TriggerError::WatchError(reason));
                }
            }
        }

        Ok(keep_running)
    }

    async fn dispatch(&mut self, matched: MatchEvent) {
        let template = &matched.target.command;
        let line = matched.line.text.as_str();

        let outcome = self.dispatcher.dispatch(template, line).await;
        match outcome {
            DispatchOutcome::Completed { exit_code: Some(0) } => {
                debug!(line, cmd = %template, "triggered command finished");
            }
            DispatchOutcome::Completed { exit_code } => {
                warn!(line, cmd = %template, ?exit_code, "triggered command exited unsuccessfully");
            }
            DispatchOutcome::Failed(reason) => {
                error!(line, cmd = %template, %reason, "triggered command could not be run");
            }
        }
    }
}
