// src/engine/event_handlers.rs

//! Per-event-kind handling for the core.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::WatchTarget;
use crate::engine::MatchEvent;
use crate::watch::{CursorTracker, FileEvent, LineExtractor};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Run the triggered command for this matched line and wait for it.
    Dispatch(MatchEvent),
    /// Every dispatch of the current scan has returned; move the cursor to
    /// this offset and go back to idle.
    CommitCursor(u64),
    /// Stop the loop cleanly (shutdown requested).
    RequestExit,
    /// Stop the loop with an error (the notification facility failed).
    Abort(String),
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    pub fn stop(command: CoreCommand) -> Self {
        Self {
            commands: vec![command],
            keep_running: false,
        }
    }
}

/// Result of reading new content from the watched file.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Scan completed; dispatch these matches, then commit `end_offset`.
    Completed {
        matches: Vec<MatchEvent>,
        end_offset: u64,
    },
    /// The file could not be read; the cursor must stay where it is.
    Aborted,
}

/// Scan everything from the cursor to end-of-file.
///
/// Matches are collected before anything is dispatched, so a read failure
/// part-way through dispatches nothing and the next scan starts over from
/// the same offset.
pub fn handle_scan(
    cursor: &mut CursorTracker,
    extractor: &LineExtractor,
    target: &Arc<WatchTarget>,
) -> ScanOutcome {
    let path = target.path.as_path();

    let size = match extractor.file_size(path) {
        Ok(size) => size,
        Err(err) => {
            warn!(file = ?path, error = %format!("{err:#}"), "cannot stat watched file; skipping scan");
            return ScanOutcome::Aborted;
        }
    };
    cursor.reset_if_stale(size);

    let start = cursor.get();
    let mut lines = match extractor.extract(path, start) {
        Ok(lines) => lines,
        Err(err) => {
            warn!(file = ?path, offset = start, error = %format!("{err:#}"), "cannot open watched file; skipping scan");
            return ScanOutcome::Aborted;
        }
    };

    let mut matches = Vec::new();
    for item in lines.by_ref() {
        let line = match item {
            Ok(line) => line,
            Err(err) => {
                warn!(file = ?path, offset = start, error = %err, "read failed mid-scan; cursor left unchanged");
                return ScanOutcome::Aborted;
            }
        };

        info!(line = %line.text, "found line");
        if target.matcher.matches(&line.text) {
            info!(line = %line.text, cmd = %target.command, "line matches; dispatching");
            matches.push(MatchEvent {
                line,
                target: Arc::clone(target),
            });
        }
    }

    ScanOutcome::Completed {
        matches,
        end_offset: lines.end_offset(),
    }
}

/// A new file now sits at the watched path (created, or renamed onto it).
///
/// Everything in it is unscanned, so the cursor goes back to the start.
pub fn handle_replaced(cursor: &mut CursorTracker, event: &FileEvent) {
    info!(kind = %event.kind, path = ?event.path, previous_offset = cursor.get(), "watched path replaced; cursor reset to start");
    cursor.reset();
}

/// The watched path went away (deleted, or renamed elsewhere).
///
/// The cursor is kept; if a new file appears it is reset by
/// [`handle_replaced`].
pub fn handle_removed(event: &FileEvent) {
    warn!(kind = %event.kind, path = ?event.path, "watched file removed; waiting for it to reappear");
}

/// Every other notification kind: recorded for diagnostics only.
pub fn handle_passive(event: &FileEvent) {
    info!(kind = %event.kind, path = ?event.path, "event");
}
