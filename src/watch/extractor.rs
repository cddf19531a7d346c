// src/watch/extractor.rs

//! Reads the complete lines appended to a file since a given offset.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::trace;

use crate::fs::FileSystem;

/// One complete line read from the watched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line content with the newline and any trailing whitespace removed.
    pub text: String,
    /// Whether a newline terminated the line in the file.
    pub trailing_newline_stripped: bool,
}

impl Line {
    fn from_raw(raw: &[u8]) -> Self {
        let trailing_newline_stripped = raw.last() == Some(&b'\n');
        let text = String::from_utf8_lossy(raw).trim_end().to_string();
        Self {
            text,
            trailing_newline_stripped,
        }
    }
}

/// Produces [`NewLines`] sequences over a file.
#[derive(Debug, Clone)]
pub struct LineExtractor {
    fs: Arc<dyn FileSystem>,
}

impl LineExtractor {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn file_size(&self, path: &Path) -> Result<u64> {
        self.fs.file_size(path)
    }

    /// Open `path` at `start_offset` and return a lazy sequence of the
    /// complete lines after it.
    ///
    /// Calling this again with the same offset yields the same lines, so an
    /// aborted scan can simply be retried.
    pub fn extract(&self, path: &Path, start_offset: u64) -> Result<NewLines> {
        let reader = self.fs.open_at(path, start_offset)?;
        Ok(NewLines::new(reader, start_offset))
    }
}

/// Iterator over newly appended lines.
///
/// Only newline-terminated lines are yielded. A trailing fragment without a
/// newline is left unconsumed: [`NewLines::end_offset`] stops just before it,
/// so the next scan reads it again once the writer finishes the line.
pub struct NewLines {
    reader: Box<dyn BufRead + Send>,
    start_offset: u64,
    consumed: u64,
    pending_fragment: u64,
    buf: Vec<u8>,
    done: bool,
}

impl NewLines {
    fn new(reader: Box<dyn BufRead + Send>, start_offset: u64) -> Self {
        Self {
            reader,
            start_offset,
            consumed: 0,
            pending_fragment: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Offset just past the last complete line yielded so far.
    pub fn end_offset(&self) -> u64 {
        self.start_offset + self.consumed
    }

    /// Size of the unterminated fragment seen at end-of-file, if any.
    pub fn pending_fragment(&self) -> u64 {
        self.pending_fragment
    }
}

impl std::fmt::Debug for NewLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewLines")
            .field("start_offset", &self.start_offset)
            .field("consumed", &self.consumed)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl Iterator for NewLines {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if self.buf.last() == Some(&b'\n') => {
                self.consumed += n as u64;
                Some(Ok(Line::from_raw(&self.buf)))
            }
            Ok(n) => {
                trace!(bytes = n, "incomplete trailing line; leaving it for the next scan");
                self.pending_fragment = n as u64;
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
