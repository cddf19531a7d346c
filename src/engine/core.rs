// src/engine/core.rs

//! Pure core state machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`WatchEvent`]s and produces:
//! - an updated cursor and loop state
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::WatchLoop`) is responsible for:
//! - reading events from the watcher channel
//! - running dispatches and waiting for them
//! - reporting back via [`WatchCore::commit_scan`]
//!
//! File access goes through the [`FileSystem`] trait, so the core can be
//! unit tested against an in-memory filesystem with no Tokio, channels or
//! processes.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::WatchTarget;
use crate::engine::event_handlers::{
    handle_passive, handle_removed, handle_replaced, handle_scan, CoreCommand, CoreStep,
    ScanOutcome,
};
use crate::engine::LoopState;
use crate::errors::{Result, TriggerError};
use crate::fs::FileSystem;
use crate::types::ScanTrigger;
use crate::watch::{CursorTracker, FileEvent, FileEventKind, LineExtractor, WatchEvent};

/// Pure core state.
///
/// This owns:
/// - the immutable watch target
/// - the cursor (the only mutable scan state)
/// - the line extractor
/// - events that arrived while a scan was in flight
///
/// It has **no** channels, no Tokio types, and never runs commands.
#[derive(Debug)]
pub struct WatchCore {
    target: Arc<WatchTarget>,
    cursor: CursorTracker,
    extractor: LineExtractor,
    scan_on: ScanTrigger,
    state: LoopState,
    deferred: VecDeque<WatchEvent>,
}

impl WatchCore {
    /// Create a core whose cursor starts at the file's current size, so
    /// content present at startup is never scanned.
    pub fn new(
        target: Arc<WatchTarget>,
        fs: Arc<dyn FileSystem>,
        scan_on: ScanTrigger,
    ) -> Result<Self> {
        let size = fs
            .file_size(&target.path)
            .map_err(|err| TriggerError::AccessError {
                path: target.path.clone(),
                reason: format!("{err:#}"),
            })?;
        info!(file = ?target.path, offset = size, "starting at end of file");

        Ok(Self::with_offset(target, fs, scan_on, size))
    }

    /// Create a core starting at an explicit offset.
    pub fn with_offset(
        target: Arc<WatchTarget>,
        fs: Arc<dyn FileSystem>,
        scan_on: ScanTrigger,
        offset: u64,
    ) -> Self {
        Self {
            target,
            cursor: CursorTracker::new(offset),
            extractor: LineExtractor::new(fs),
            scan_on,
            state: LoopState::Idle,
            deferred: VecDeque::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn cursor_offset(&self) -> u64 {
        self.cursor.get()
    }

    pub fn target(&self) -> &Arc<WatchTarget> {
        &self.target
    }

    /// Handle a single event, updating core state and returning the
    /// resulting commands for the IO shell.
    ///
    /// Scans are not reentrant: an event arriving while a scan awaits
    /// [`commit_scan`](Self::commit_scan) is held back and handled right
    /// after the commit.
    pub fn step(&mut self, event: WatchEvent) -> CoreStep {
        if self.state == LoopState::Scanning {
            debug!(?event, "scan in progress; deferring event");
            self.deferred.push_back(event);
            return CoreStep::idle();
        }

        match event {
            WatchEvent::File(file_event) => self.on_file_event(file_event),
            WatchEvent::Failed(reason) => {
                error!(%reason, "file watch failed");
                CoreStep::stop(CoreCommand::Abort(reason))
            }
            WatchEvent::ShutdownRequested => CoreStep::stop(CoreCommand::RequestExit),
        }
    }

    /// Finish the in-flight scan: advance the cursor and return to idle.
    ///
    /// Returns the step for the next deferred event, if any.
    pub fn commit_scan(&mut self, end_offset: u64) -> CoreStep {
        if self.state != LoopState::Scanning {
            debug!(end_offset, "commit without a scan in progress; ignoring");
            return CoreStep::idle();
        }

        self.cursor.set(end_offset);
        self.state = LoopState::Idle;

        match self.deferred.pop_front() {
            Some(event) => self.step(event),
            None => CoreStep::idle(),
        }
    }

    fn on_file_event(&mut self, event: FileEvent) -> CoreStep {
        match event.kind {
            FileEventKind::CloseWrite => self.scan(&event),
            FileEventKind::Modify if self.scan_on == ScanTrigger::Modify => self.scan(&event),
            FileEventKind::Create | FileEventKind::MovedHere => {
                handle_replaced(&mut self.cursor, &event);
                CoreStep::idle()
            }
            FileEventKind::Delete | FileEventKind::MovedAway => {
                handle_removed(&event);
                CoreStep::idle()
            }
            _ => {
                handle_passive(&event);
                CoreStep::idle()
            }
        }
    }

    fn scan(&mut self, event: &FileEvent) -> CoreStep {
        info!(kind = %event.kind, path = ?event.path, offset = self.cursor.get(), "scanning for new lines");

        match handle_scan(&mut self.cursor, &self.extractor, &self.target) {
            ScanOutcome::Completed {
                matches,
                end_offset,
            } => {
                self.state = LoopState::Scanning;
                let mut commands: Vec<CoreCommand> =
                    matches.into_iter().map(CoreCommand::Dispatch).collect();
                commands.push(CoreCommand::CommitCursor(end_offset));
                CoreStep {
                    commands,
                    keep_running: true,
                }
            }
            ScanOutcome::Aborted => CoreStep::idle(),
        }
    }
}
