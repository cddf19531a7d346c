// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::watch::events::{classify, WatchEvent};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    target: PathBuf,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Spawn a filesystem watcher for `file` and forward its notifications to
/// the watch loop as [`WatchEvent`]s.
///
/// The watch is placed on the file's parent directory rather than on the
/// file itself, so that it survives the file being deleted and recreated
/// (log rotation). Only events naming the file are forwarded.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_watcher(
    file: impl AsRef<Path>,
    runtime_tx: mpsc::Sender<WatchEvent>,
) -> Result<WatcherHandle> {
    let (dir, target) = resolve_watch_paths(file.as_ref())?;

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Err(err) = event_tx.send(res) {
                // We can't log via tracing here easily, so fallback to stderr.
                eprintln!("trigger: failed to forward notify event: {err}");
            }
        },
        Config::default(),
    )?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("watching directory {:?}", dir))?;

    info!(file = ?target, dir = ?dir, "file watcher started");

    let async_target = target.clone();
    tokio::spawn(async move {
        while let Some(res) = event_rx.recv().await {
            let forwarded = match res {
                Ok(event) => {
                    debug!(?event, "received notify event");
                    match classify(&event, &async_target) {
                        Some(file_event) => WatchEvent::File(file_event),
                        None => continue,
                    }
                }
                Err(err) => WatchEvent::Failed(err.to_string()),
            };

            if let Err(err) = runtime_tx.send(forwarded).await {
                // The watch loop has gone away; nothing left to notify.
                warn!("failed to forward watch event: {err}");
                break;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        target,
    })
}

/// Canonical parent directory and canonical file path for `file`.
///
/// `notify` reports paths under the directory it was given, so comparing
/// against the canonical form avoids misses caused by relative paths or
/// symlinked directories. A symlinked `file` is resolved to the file it
/// points at: writes land there, so that is the directory to watch.
pub fn resolve_watch_paths(file: &Path) -> Result<(PathBuf, PathBuf)> {
    let target = file
        .canonicalize()
        .with_context(|| format!("canonicalizing {:?}", file))?;
    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("watched path {:?} has no parent directory", target))?;
    Ok((dir, target))
}
