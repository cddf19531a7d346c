// tests/core_scanning.rs

use std::path::PathBuf;
use std::sync::Arc;

use trigger::engine::{LoopState, WatchCore};
use trigger::fs::mock::MockFileSystem;
use trigger::fs::FileSystem;
use trigger::types::ScanTrigger;
use trigger::watch::{FileEventKind, WatchEvent};
use trigger_test_utils::builders::WatchTargetBuilder;
use trigger_test_utils::core_driver::{close_write, drive, file_event};
use trigger_test_utils::init_tracing;

fn log_path() -> PathBuf {
    PathBuf::from("/var/log/app.log")
}

fn setup(initial: &str, pattern: &str) -> (MockFileSystem, WatchCore) {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file(log_path(), initial);
    let target = WatchTargetBuilder::new(log_path())
        .pattern(pattern)
        .command("notify %s")
        .build_shared();
    let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
    let core = WatchCore::new(target, shared, ScanTrigger::CloseWrite).unwrap();
    (fs, core)
}

#[test]
fn pre_existing_content_is_never_scanned() {
    let (_fs, mut core) = setup("FAIL one\nFAIL two\nFAIL three\n", "FAIL");

    assert_eq!(core.cursor_offset(), 29);
    let trace = drive(&mut core, close_write(log_path()));

    assert!(trace.dispatched.is_empty());
    assert_eq!(trace.commits, vec![29]);
}

#[test]
fn each_appended_line_is_matched_exactly_once() {
    let (fs, mut core) = setup("", "line");
    let mut seen = Vec::new();

    for batch in [vec!["line 1", "line 2"], vec!["line 3"], vec![], vec!["line 4", "line 5", "line 6"]] {
        for line in &batch {
            fs.append(log_path(), format!("{line}\n"));
        }
        seen.extend(drive(&mut core, close_write(log_path())).dispatched);
    }
    // Spurious notifications with nothing new must not rescan.
    seen.extend(drive(&mut core, close_write(log_path())).dispatched);

    assert_eq!(seen, vec!["line 1", "line 2", "line 3", "line 4", "line 5", "line 6"]);
}

#[test]
fn coalesced_writes_are_read_up_to_end_of_file() {
    let (fs, mut core) = setup("", "ERR");

    fs.append(log_path(), "ERR a\n");
    fs.append(log_path(), "fine\n");
    fs.append(log_path(), "ERR b\n");
    let trace = drive(&mut core, close_write(log_path()));

    assert_eq!(trace.dispatched, vec!["ERR a", "ERR b"]);
    assert_eq!(core.cursor_offset(), 17);
}

#[test]
fn truncation_resets_cursor_and_rescans() {
    let (fs, mut core) = setup("old content that is long\n", "new");
    assert_eq!(core.cursor_offset(), 25);

    fs.truncate(log_path(), 0);
    fs.append(log_path(), "new line\n");
    let trace = drive(&mut core, close_write(log_path()));

    assert_eq!(trace.dispatched, vec!["new line"]);
    assert_eq!(core.cursor_offset(), 9);
}

#[test]
fn partial_line_is_carried_over_to_next_scan() {
    let (fs, mut core) = setup("", "disk");

    fs.append(log_path(), "FAIL: di");
    let first = drive(&mut core, close_write(log_path()));
    assert!(first.dispatched.is_empty());
    assert_eq!(core.cursor_offset(), 0);

    fs.append(log_path(), "sk full\n");
    let second = drive(&mut core, close_write(log_path()));
    assert_eq!(second.dispatched, vec!["FAIL: disk full"]);
    assert_eq!(core.cursor_offset(), 16);
}

#[test]
fn read_failure_keeps_cursor_and_dispatches_nothing() {
    let (fs, mut core) = setup("", "x");

    fs.append(log_path(), "x1\nx2\nx3\n");
    fs.fail_reads_after(log_path(), Some(4));
    let failed = drive(&mut core, close_write(log_path()));
    assert!(failed.dispatched.is_empty());
    assert!(failed.commits.is_empty());
    assert!(failed.keep_running);
    assert_eq!(core.cursor_offset(), 0);
    assert_eq!(core.state(), LoopState::Idle);

    fs.fail_reads_after(log_path(), None);
    let retried = drive(&mut core, close_write(log_path()));
    assert_eq!(retried.dispatched, vec!["x1", "x2", "x3"]);
}

#[test]
fn vanished_file_is_recovered_locally() {
    let (fs, mut core) = setup("", "x");

    fs.remove(log_path());
    let trace = drive(&mut core, close_write(log_path()));
    assert!(trace.keep_running);
    assert!(trace.dispatched.is_empty());

    fs.add_file(log_path(), "x again\n");
    let trace = drive(&mut core, close_write(log_path()));
    assert_eq!(trace.dispatched, vec!["x again"]);
}

#[test]
fn unreadable_file_skips_scan() {
    let (fs, mut core) = setup("", "x");
    fs.append(log_path(), "x\n");
    fs.set_readable(log_path(), false);

    let trace = drive(&mut core, close_write(log_path()));
    assert!(trace.dispatched.is_empty());
    assert_eq!(core.cursor_offset(), 0);
}

#[test]
fn non_trigger_events_only_log() {
    let (fs, mut core) = setup("", "x");
    fs.append(log_path(), "x\n");

    for kind in [
        FileEventKind::Access,
        FileEventKind::Attrib,
        FileEventKind::CloseNoWrite,
        FileEventKind::Modify,
        FileEventKind::Open,
        FileEventKind::Other,
    ] {
        let trace = drive(&mut core, file_event(kind, log_path()));
        assert!(trace.dispatched.is_empty(), "{kind} must not scan");
        assert!(trace.commits.is_empty());
        assert!(trace.keep_running);
    }
    assert_eq!(core.cursor_offset(), 0);

    let trace = drive(&mut core, close_write(log_path()));
    assert_eq!(trace.dispatched, vec!["x"]);
}

#[test]
fn modify_scans_when_configured() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file(log_path(), "");
    let target = WatchTargetBuilder::new(log_path()).pattern("x").build_shared();
    let mut core = WatchCore::new(target, Arc::new(fs.clone()), ScanTrigger::Modify).unwrap();

    fs.append(log_path(), "x\n");
    let trace = drive(&mut core, file_event(FileEventKind::Modify, log_path()));
    assert_eq!(trace.dispatched, vec!["x"]);

    let trace = drive(&mut core, close_write(log_path()));
    assert!(trace.dispatched.is_empty());
}

#[test]
fn recreated_file_is_scanned_from_start() {
    let (fs, mut core) = setup("a long line that was there before rotation\n", "FAIL");

    drive(&mut core, file_event(FileEventKind::Delete, log_path()));
    assert_eq!(core.cursor_offset(), 43);

    fs.add_file(log_path(), "");
    drive(&mut core, file_event(FileEventKind::Create, log_path()));
    assert_eq!(core.cursor_offset(), 0);

    // Larger than the old offset: only the Create-driven reset catches this.
    fs.append(log_path(), "FAIL: after rotation, and long enough to pass the old offset\n");
    let trace = drive(&mut core, close_write(log_path()));
    assert_eq!(
        trace.dispatched,
        vec!["FAIL: after rotation, and long enough to pass the old offset"]
    );
}

#[test]
fn rename_onto_path_resets_cursor() {
    let (_fs, mut core) = setup("0123456789\n", "x");
    drive(&mut core, file_event(FileEventKind::MovedAway, log_path()));
    assert_eq!(core.cursor_offset(), 11);
    drive(&mut core, file_event(FileEventKind::MovedHere, log_path()));
    assert_eq!(core.cursor_offset(), 0);
}

#[test]
fn events_during_scan_are_deferred_until_commit() {
    let (fs, mut core) = setup("", "x");
    fs.append(log_path(), "x1\n");

    let step = core.step(close_write(log_path()));
    assert_eq!(core.state(), LoopState::Scanning);
    assert_eq!(step.commands.len(), 2);

    // Arrives mid-scan; must not be processed concurrently.
    fs.append(log_path(), "x2\n");
    let deferred = core.step(close_write(log_path()));
    assert!(deferred.commands.is_empty());

    let next = core.commit_scan(3);
    assert_eq!(core.cursor_offset(), 3);
    assert_eq!(core.state(), LoopState::Scanning);
    assert_eq!(next.commands.len(), 2);

    core.commit_scan(6);
    assert_eq!(core.cursor_offset(), 6);
    assert_eq!(core.state(), LoopState::Idle);
}

#[test]
fn watcher_failure_aborts_and_shutdown_exits() {
    let (_fs, mut core) = setup("", "x");

    let failed = drive(&mut core, WatchEvent::Failed("inotify queue overflow".into()));
    assert!(!failed.keep_running);
    assert_eq!(failed.aborted.as_deref(), Some("inotify queue overflow"));

    let shutdown = drive(&mut core, WatchEvent::ShutdownRequested);
    assert!(!shutdown.keep_running);
    assert!(shutdown.exit_requested);
}

#[test]
fn missing_file_at_startup_is_an_access_error() {
    let fs = MockFileSystem::new();
    let target = WatchTargetBuilder::new(log_path()).build_shared();
    let err = WatchCore::new(target, Arc::new(fs), ScanTrigger::CloseWrite).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(matches!(err, trigger::errors::TriggerError::AccessError { .. }));
}
