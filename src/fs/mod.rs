// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface used by the line extractor and startup
/// validation.
pub trait FileSystem: Send + Sync + Debug {
    /// Current size of the file in bytes.
    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Open the file for reading, positioned at `offset`.
    fn open_at(&self, path: &Path, offset: u64) -> Result<Box<dyn BufRead + Send>>;

    fn is_file(&self, path: &Path) -> bool;

    /// Whether the current process may open the file for reading.
    fn is_readable(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn file_size(&self, path: &Path) -> Result<u64> {
        let meta = fs::metadata(path).with_context(|| format!("stat {:?}", path))?;
        Ok(meta.len())
    }

    fn open_at(&self, path: &Path, offset: u64) -> Result<Box<dyn BufRead + Send>> {
        let mut file = fs::File::open(path).with_context(|| format!("opening file {:?}", path))?;
        file.seek(SeekFrom::Start(offset))
            .with_context(|| format!("seeking to {} in {:?}", offset, path))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_readable(&self, path: &Path) -> bool {
        fs::File::open(path).is_ok()
    }
}
