use std::collections::VecDeque;
use std::path::Path;

use trigger::engine::{CoreCommand, WatchCore};
use trigger::watch::{FileEvent, FileEventKind, WatchEvent};

/// What a single synchronous pass through the core produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepTrace {
    /// Matched lines, in dispatch order.
    pub dispatched: Vec<String>,
    /// Offsets committed, in order.
    pub commits: Vec<u64>,
    pub exit_requested: bool,
    pub aborted: Option<String>,
    pub keep_running: bool,
}

/// Feed one event to the core and play its commands the way the runtime
/// does, treating every dispatch as instantly finished.
pub fn drive(core: &mut WatchCore, event: WatchEvent) -> StepTrace {
    let step = core.step(event);
    let mut trace = StepTrace {
        keep_running: step.keep_running,
        ..StepTrace::default()
    };
    let mut pending: VecDeque<CoreCommand> = step.commands.into();

    while let Some(command) = pending.pop_front() {
        match command {
            CoreCommand::Dispatch(matched) => trace.dispatched.push(matched.line.text),
            CoreCommand::CommitCursor(offset) => {
                trace.commits.push(offset);
                let next = core.commit_scan(offset);
                trace.keep_running &= next.keep_running;
                pending.extend(next.commands);
            }
            CoreCommand::RequestExit => trace.exit_requested = true,
            CoreCommand::Abort(reason) => trace.aborted = Some(reason),
        }
    }
    trace
}

pub fn file_event(kind: FileEventKind, path: impl AsRef<Path>) -> WatchEvent {
    WatchEvent::File(FileEvent::new(kind, path.as_ref()))
}

pub fn close_write(path: impl AsRef<Path>) -> WatchEvent {
    file_event(FileEventKind::CloseWrite, path)
}
