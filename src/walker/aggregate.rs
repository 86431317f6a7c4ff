//! Run-wide counters shared by all root workers

use crate::walker::accumulate::SizeTally;
use std::sync::atomic::{AtomicU64, Ordering};

/// Grand totals across every root of one run
///
/// Workers only ever add into it, saturating at `u64::MAX` the same way
/// [`SizeTally::merge`] does. The coordinator reads it once,
/// after every worker has been joined, so relaxed ordering is enough: the
/// join is the synchronization point.
#[derive(Debug, Default)]
pub struct GlobalAggregator {
    total_size: AtomicU64,
    actual_size: AtomicU64,
    files: AtomicU64,
}

impl GlobalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one root's tally into the grand totals
    pub fn add(&self, tally: &SizeTally) {
        saturating_add(&self.total_size, tally.total_size);
        saturating_add(&self.actual_size, tally.actual_size);
        saturating_add(&self.files, tally.files);
    }

    /// Current grand totals
    pub fn snapshot(&self) -> SizeTally {
        SizeTally {
            total_size: self.total_size.load(Ordering::Relaxed),
            actual_size: self.actual_size.load(Ordering::Relaxed),
            files: self.files.load(Ordering::Relaxed),
        }
    }
}

fn saturating_add(counter: &AtomicU64, value: u64) {
    // The closure never returns None, so the update cannot fail
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(value))
    });
}
