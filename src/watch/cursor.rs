// src/watch/cursor.rs

use tracing::{debug, warn};

/// Byte offset separating already-scanned content from new content.
///
/// Owned by the watch core and mutated only once per completed scan, so no
/// locking is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorTracker {
    offset: u64,
}

impl CursorTracker {
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }

    pub fn get(&self) -> u64 {
        self.offset
    }

    pub fn set(&mut self, new_offset: u64) {
        debug!(from = self.offset, to = new_offset, "advancing cursor");
        self.offset = new_offset;
    }

    /// Rewind to the start of the file if it is now smaller than the cursor.
    ///
    /// A shrinking file means truncation or replacement; keeping the old
    /// offset would skip everything written until the file grows past it.
    /// Returns `true` if the cursor was reset.
    pub fn reset_if_stale(&mut self, current_file_size: u64) -> bool {
        if current_file_size < self.offset {
            warn!(
                offset = self.offset,
                size = current_file_size,
                "file is smaller than the scanned offset (truncated or rotated); rescanning from start"
            );
            self.offset = 0;
            return true;
        }
        false
    }

    /// Unconditionally rewind, e.g. when a new file appears at the path.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
