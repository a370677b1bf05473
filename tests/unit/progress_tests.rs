//! Unit tests for progress accounting

use portal_pack::ProgressSnapshot;
use portal_pack::services::progress::{ProgressTracker, compute_throughput};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn test_percent() {
    let snapshot = |done, total| ProgressSnapshot {
        files_processed: done,
        total_files: total,
        bytes_processed: 0,
    };

    assert_eq!(snapshot(0, 0).percent(), 0);
    assert_eq!(snapshot(2, 5).percent(), 40);
    assert_eq!(snapshot(5, 5).percent(), 100);
    assert_eq!(snapshot(1, 3).percent(), 33);
}

#[test]
fn test_compute_throughput() {
    assert_eq!(compute_throughput(1024, Duration::ZERO), None);
    assert_eq!(compute_throughput(1024, Duration::from_secs(2)), Some(512));
    assert_eq!(compute_throughput(500, Duration::from_millis(500)), Some(1000));
}

#[test]
fn test_begin_attempt_resets_counters_but_keeps_total() {
    let tracker = ProgressTracker::new();
    tracker.set_total(4);
    tracker.record_bytes(100);
    tracker.entry_committed();
    tracker.entry_committed();
    assert_eq!(tracker.snapshot().files_processed, 2);

    tracker.begin_attempt();
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.files_processed, 0);
    assert_eq!(snapshot.bytes_processed, 0);
    assert_eq!(snapshot.total_files, 4);
}

#[test]
fn test_notifier_sees_increasing_counts() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let tracker = ProgressTracker::with_notifier(Arc::new(move |snapshot: &ProgressSnapshot| {
        let previous = seen.fetch_add(1, Ordering::SeqCst);
        assert_eq!(snapshot.files_processed, previous + 1);
    }));
    tracker.set_total(3);

    // Clones share counters and notifier
    let handle = tracker.clone();
    handle.entry_committed();
    tracker.entry_committed();
    handle.entry_committed();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(tracker.snapshot().percent(), 100);
}
