//! Progress accounting shared between the archive writer and any display.

use crate::models::ProgressSnapshot;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Callback invoked every time an entry is committed to the archive.
pub type ProgressNotifier = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

#[derive(Default)]
struct Counters {
    files_processed: AtomicUsize,
    total_files: AtomicUsize,
    bytes_processed: AtomicU64,
}

/// Cloneable handle over a run's progress counters.
///
/// Counters can be polled through [`ProgressTracker::snapshot`] (the CLI spinner does this on
/// a timer) or pushed to a notifier. Within one attempt `files_processed` never decreases.
#[derive(Clone, Default)]
pub struct ProgressTracker {
    counters: Arc<Counters>,
    notifier: Option<ProgressNotifier>,
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("snapshot", &self.snapshot())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_notifier(notifier: ProgressNotifier) -> Self {
        Self {
            counters: Arc::default(),
            notifier: Some(notifier),
        }
    }

    pub fn set_total(&self, total_files: usize) {
        self.counters
            .total_files
            .store(total_files, Ordering::Relaxed);
    }

    /// Reset per-attempt counters before a new archive attempt writes anything.
    pub fn begin_attempt(&self) {
        self.counters.files_processed.store(0, Ordering::Relaxed);
        self.counters.bytes_processed.store(0, Ordering::Relaxed);
    }

    pub fn record_bytes(&self, bytes: u64) {
        self.counters
            .bytes_processed
            .fetch_add(bytes, Ordering::Relaxed);
    }

    /// Count one more entry as fully written.
    pub fn entry_committed(&self) {
        self.counters.files_processed.fetch_add(1, Ordering::AcqRel);
        if let Some(notifier) = &self.notifier {
            notifier(&self.snapshot());
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            files_processed: self.counters.files_processed.load(Ordering::Acquire),
            total_files: self.counters.total_files.load(Ordering::Relaxed),
            bytes_processed: self.counters.bytes_processed.load(Ordering::Relaxed),
        }
    }
}

/// Bytes per second over `elapsed`, or `None` when no time has passed.
#[must_use]
pub fn compute_throughput(bytes: u64, elapsed: Duration) -> Option<u64> {
    let nanos = elapsed.as_nanos();
    if nanos == 0 {
        return None;
    }

    let numerator = u128::from(bytes) * 1_000_000_000u128;
    let rate = numerator / nanos;
    u64::try_from(rate.min(u128::from(u64::MAX))).ok()
}
