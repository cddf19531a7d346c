// tests/notify_end_to_end.rs
//
// Drives the real `notify` watcher against a temp file. Linux only: the
// scan trigger is inotify's close-after-write event.
#![cfg(target_os = "linux")]

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use trigger::engine::{WatchCore, WatchLoop};
use trigger::fs::RealFileSystem;
use trigger::types::ScanTrigger;
use trigger::watch::{spawn_watcher, WatchEvent};
use trigger_test_utils::builders::WatchTargetBuilder;
use trigger_test_utils::recording_dispatcher::RecordingDispatcher;
use trigger_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn append_and_close(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

#[tokio::test]
async fn matching_line_written_by_another_process_is_dispatched_once() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let log = dir.path().join("app.log");
    fs::write(&log, "FAIL: before startup\n")?;

    let target = WatchTargetBuilder::new(&log)
        .pattern("FAIL")
        .command("notify %s")
        .build_shared();
    let core = WatchCore::new(target, Arc::new(RealFileSystem), ScanTrigger::CloseWrite)?;

    let (tx, rx) = mpsc::channel(64);
    let _watcher = spawn_watcher(&log, tx.clone())?;
    let (dispatcher, mut dispatched_rx) = RecordingDispatcher::new().with_notifications();
    let recorded = dispatcher.clone();
    let handle = tokio::spawn(WatchLoop::new(core, rx, dispatcher).run());

    append_and_close(&log, "ok\n")?;
    append_and_close(&log, "FAIL: disk\n")?;
    append_and_close(&log, "ok\n")?;

    let first = with_timeout(dispatched_rx.recv()).await.unwrap();
    assert_eq!(first.line, "FAIL: disk");

    // Give the remaining notifications time to drain.
    tokio::time::sleep(Duration::from_millis(300)).await;
    tx.send(WatchEvent::ShutdownRequested).await?;
    with_timeout(handle).await??;

    assert_eq!(recorded.lines(), vec!["FAIL: disk"]);
    Ok(())
}

#[tokio::test]
async fn rotated_file_is_followed() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let log = dir.path().join("app.log");
    fs::write(&log, "some old content that makes the offset large\n")?;

    let target = WatchTargetBuilder::new(&log).pattern("FAIL").build_shared();
    let core = WatchCore::new(target, Arc::new(RealFileSystem), ScanTrigger::CloseWrite)?;

    let (tx, rx) = mpsc::channel(64);
    let _watcher = spawn_watcher(&log, tx.clone())?;
    let (dispatcher, mut dispatched_rx) = RecordingDispatcher::new().with_notifications();
    let handle = tokio::spawn(WatchLoop::new(core, rx, dispatcher).run());

    fs::rename(&log, dir.path().join("app.log.1"))?;
    fs::write(&log, "FAIL: after rotation\n")?;

    let first = with_timeout(dispatched_rx.recv()).await.unwrap();
    assert_eq!(first.line, "FAIL: after rotation");

    tx.send(WatchEvent::ShutdownRequested).await?;
    with_timeout(handle).await??;
    Ok(())
}

#[tokio::test]
async fn symlinked_path_follows_the_real_file() -> TestResult {
    init_tracing();
    let real_dir = TempDir::new()?;
    let link_dir = TempDir::new()?;
    let real = real_dir.path().join("app.log");
    let link = link_dir.path().join("app.log");
    fs::write(&real, "")?;
    std::os::unix::fs::symlink(&real, &link)?;

    let target = WatchTargetBuilder::new(&link)
        .pattern("FAIL")
        .command("notify %s")
        .build_shared();
    let core = WatchCore::new(target, Arc::new(RealFileSystem), ScanTrigger::CloseWrite)?;

    let (tx, rx) = mpsc::channel(64);
    let _watcher = spawn_watcher(&link, tx.clone())?;
    let (dispatcher, mut dispatched_rx) = RecordingDispatcher::new().with_notifications();
    let recorded = dispatcher.clone();
    let handle = tokio::spawn(WatchLoop::new(core, rx, dispatcher).run());

    append_and_close(&link, "FAIL: via symlink\n")?;

    let first = with_timeout(dispatched_rx.recv()).await.unwrap();
    assert_eq!(first.line, "FAIL: via symlink");

    tx.send(WatchEvent::ShutdownRequested).await?;
    with_timeout(handle).await??;
    assert_eq!(recorded.lines(), vec!["FAIL: via symlink"]);
    Ok(())
}
