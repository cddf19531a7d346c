use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;
use trigger::engine::WatchCore;
use trigger::fs::mock::MockFileSystem;
use trigger::fs::FileSystem;
use trigger::types::ScanTrigger;
use trigger_test_utils::builders::WatchTargetBuilder;
use trigger_test_utils::core_driver::{close_write, drive};

fn log_path() -> PathBuf {
    PathBuf::from("/prop/app.log")
}

// Lines plus a set of cut points into their concatenation. Each chunk
// between two cut points is appended and followed by one close-write.
fn appended_chunks() -> impl Strategy<Value = (Vec<String>, Vec<usize>)> {
    proptest::collection::vec("[a-z0-9]{0,12}", 0..20).prop_flat_map(|lines| {
        let total: usize = lines.iter().map(|l| l.len() + 1).sum();
        let cuts = proptest::collection::vec(0..=total, 0..8);
        (Just(lines), cuts)
    })
}

proptest! {
    #[test]
    fn every_complete_line_is_dispatched_once_in_order((lines, mut cuts) in appended_chunks()) {
        let fs = MockFileSystem::new();
        fs.add_file(log_path(), "");
        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        let target = WatchTargetBuilder::new(log_path()).pattern("").build_shared();
        let mut core = WatchCore::new(target, shared, ScanTrigger::CloseWrite).unwrap();

        let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let bytes = content.as_bytes();
        cuts.push(bytes.len());
        cuts.sort_unstable();

        let mut seen = Vec::new();
        let mut written = 0;
        for cut in cuts {
            fs.append(log_path(), &bytes[written..cut]);
            written = cut;
            let trace = drive(&mut core, close_write(log_path()));
            prop_assert!(trace.keep_running);
            seen.extend(trace.dispatched);
            // The cursor never passes an unterminated fragment.
            let complete = bytes[..written].iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
            prop_assert_eq!(core.cursor_offset(), complete as u64);
        }

        prop_assert_eq!(seen, lines);
        prop_assert_eq!(core.cursor_offset(), bytes.len() as u64);
    }

    #[test]
    fn truncation_never_skips_fresh_lines(
        before in proptest::collection::vec("[a-z]{1,8}", 1..10),
        after in proptest::collection::vec("[a-z]{1,8}", 1..10),
    ) {
        let fs = MockFileSystem::new();
        fs.add_file(log_path(), "");
        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        let target = WatchTargetBuilder::new(log_path()).pattern("").build_shared();
        let mut core = WatchCore::new(target, shared, ScanTrigger::CloseWrite).unwrap();

        let old: String = before.iter().map(|l| format!("{l}\n")).collect();
        fs.append(log_path(), &old);
        drive(&mut core, close_write(log_path()));

        let fresh: String = after.iter().map(|l| format!("{l}\n")).collect();
        fs.truncate(log_path(), 0);
        fs.append(log_path(), &fresh);
        let trace = drive(&mut core, close_write(log_path()));

        // Only detectable when the new file is shorter than the old cursor.
        if fresh.len() < old.len() {
            prop_assert_eq!(trace.dispatched, after);
        }
        prop_assert!(core.cursor_offset() <= fresh.len() as u64);
    }
}
