// src/watch/events.rs

//! Finite set of notification kinds the watch loop reacts to.

use std::fmt;
use std::path::{Path, PathBuf};

use notify::event::{AccessKind, AccessMode, EventKind, ModifyKind, RenameMode};

/// Kind of filesystem notification observed for the watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEventKind {
    Access,
    Attrib,
    CloseNoWrite,
    /// A writer closed the file after writing; the scan trigger.
    CloseWrite,
    Create,
    Delete,
    Modify,
    /// Renamed away from the watched path.
    MovedAway,
    /// Renamed onto the watched path.
    MovedHere,
    Open,
    Other,
}

impl FileEventKind {
    /// Map a `notify` kind onto ours.
    ///
    /// Renames reported as a single `Both` event are resolved by
    /// [`classify`], which knows which side is the watched path.
    pub fn from_notify(kind: &EventKind) -> Self {
        match kind {
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => FileEventKind::CloseWrite,
            EventKind::Access(AccessKind::Close(_)) => FileEventKind::CloseNoWrite,
            EventKind::Access(AccessKind::Open(_)) => FileEventKind::Open,
            EventKind::Access(_) => FileEventKind::Access,
            EventKind::Create(_) => FileEventKind::Create,
            EventKind::Modify(ModifyKind::Metadata(_)) => FileEventKind::Attrib,
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => FileEventKind::MovedAway,
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => FileEventKind::MovedHere,
            EventKind::Modify(_) => FileEventKind::Modify,
            EventKind::Remove(_) => FileEventKind::Delete,
            _ => FileEventKind::Other,
        }
    }
}

impl fmt::Display for FileEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileEventKind::Access => "access",
            FileEventKind::Attrib => "attrib",
            FileEventKind::CloseNoWrite => "close, no write",
            FileEventKind::CloseWrite => "close, write",
            FileEventKind::Create => "create",
            FileEventKind::Delete => "delete",
            FileEventKind::Modify => "modify",
            FileEventKind::MovedAway => "moved away",
            FileEventKind::MovedHere => "moved here",
            FileEventKind::Open => "open",
            FileEventKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A notification concerning the watched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub kind: FileEventKind,
    pub path: PathBuf,
}

impl FileEvent {
    pub fn new(kind: FileEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Everything the watch loop can receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    File(FileEvent),
    /// The notification facility reported an error; not recoverable.
    Failed(String),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Reduce a raw `notify` event to the one concerning `target`, if any.
///
/// The watcher observes the parent directory, so events for sibling files
/// are dropped here.
pub fn classify(event: &notify::Event, target: &Path) -> Option<FileEvent> {
    if let EventKind::Modify(ModifyKind::Name(RenameMode::Both)) = event.kind {
        let from = event.paths.first();
        let to = event.paths.get(1);
        if to.map(PathBuf::as_path) == Some(target) {
            return Some(FileEvent::new(FileEventKind::MovedHere, target));
        }
        if from.map(PathBuf::as_path) == Some(target) {
            return Some(FileEvent::new(FileEventKind::MovedAway, target));
        }
        return None;
    }

    event
        .paths
        .iter()
        .find(|p| p.as_path() == target)
        .map(|p| FileEvent::new(FileEventKind::from_notify(&event.kind), p.clone()))
}
