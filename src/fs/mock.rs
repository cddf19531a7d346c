// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
struct MockFile {
    content: Vec<u8>,
    readable: bool,
    /// Reads fail once this many bytes past the open offset were returned.
    fail_after: Option<usize>,
}

/// In-memory filesystem for driving the scanning core without real IO.
///
/// Clones share the same underlying files, so a test can keep one handle to
/// append/truncate while the core reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockFile>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a file with the given content.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let mut files = self.files.lock().unwrap();
        files.insert(
            path.as_ref().to_path_buf(),
            MockFile {
                content: content.into(),
                readable: true,
                fail_after: None,
            },
        );
    }

    /// Append bytes, creating the file if needed.
    pub fn append(&self, path: impl AsRef<Path>, bytes: impl AsRef<[u8]>) {
        let mut files = self.files.lock().unwrap();
        let file = files
            .entry(path.as_ref().to_path_buf())
            .or_insert_with(|| MockFile {
                readable: true,
                ..MockFile::default()
            });
        file.content.extend_from_slice(bytes.as_ref());
    }

    /// Shrink the file to `len` bytes.
    pub fn truncate(&self, path: impl AsRef<Path>, len: usize) {
        let mut files = self.files.lock().unwrap();
        if let Some(file) = files.get_mut(path.as_ref()) {
            file.content.truncate(len);
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.files.lock().unwrap().remove(path.as_ref());
    }

    pub fn set_readable(&self, path: impl AsRef<Path>, readable: bool) {
        if let Some(file) = self.files.lock().unwrap().get_mut(path.as_ref()) {
            file.readable = readable;
        }
    }

    /// Make reads of this file fail with an IO error after `bytes` bytes.
    pub fn fail_reads_after(&self, path: impl AsRef<Path>, bytes: Option<usize>) {
        if let Some(file) = self.files.lock().unwrap().get_mut(path.as_ref()) {
            file.fail_after = bytes;
        }
    }
}

impl FileSystem for MockFileSystem {
    fn file_size(&self, path: &Path) -> Result<u64> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(file) => Ok(file.content.len() as u64),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn open_at(&self, path: &Path, offset: u64) -> Result<Box<dyn BufRead + Send>> {
        let files = self.files.lock().unwrap();
        let file = files
            .get(path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;
        if !file.readable {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        let start = (offset as usize).min(file.content.len());
        let tail = file.content[start..].to_vec();
        match file.fail_after {
            Some(limit) => Ok(Box::new(BufReader::new(FailingReader {
                inner: Cursor::new(tail),
                remaining: limit,
            }))),
            None => Ok(Box::new(Cursor::new(tail))),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_readable(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(path), Some(file) if file.readable)
    }
}

/// Reader that returns an error once its byte allowance is spent.
struct FailingReader {
    inner: Cursor<Vec<u8>>,
    remaining: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("simulated read failure"));
        }
        let cap = buf.len().min(self.remaining);
        let n = self.inner.read(&mut buf[..cap])?;
        if n == 0 {
            return Ok(0);
        }
        self.remaining -= n;
        Ok(n)
    }
}
