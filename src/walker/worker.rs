//! Per-root worker
//!
//! Each worker:
//! - Owns exactly one [`RootTask`]
//! - Walks its root with a [`TreeWalker`] and folds the entries with a
//!   [`SizeAccumulator`]
//! - Sends its [`RootReport`] to the coordinator
//! - Adds its totals into the shared [`GlobalAggregator`]

use crate::error::{Result, WalkerError, WorkerError};
use crate::probe::EntryProbe;
use crate::walker::accumulate::{SizeAccumulator, SizeTally};
use crate::walker::aggregate::GlobalAggregator;
use crate::walker::tree::TreeWalker;
use crossbeam_channel::Sender;
use humansize::{format_size, BINARY};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// One root path to measure, down to a depth limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTask {
    root: PathBuf,
    depth_limit: u32,
}

impl RootTask {
    pub fn new(root: impl Into<PathBuf>, depth_limit: u32) -> Self {
        Self {
            root: root.into(),
            depth_limit,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }
}

/// Final totals for one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootReport {
    pub path: PathBuf,
    pub tally: SizeTally,
}

/// Message from a worker thread to the coordinator
#[derive(Debug)]
pub enum WorkerEvent {
    /// Root measured successfully
    Finished { id: usize, report: RootReport },

    /// Root failed; the abort flag has already been raised
    Failed { id: usize, error: WalkerError },
}

/// Measures a single root
#[derive(Debug)]
pub struct RootWorker<P> {
    id: usize,
    task: RootTask,
    probe: P,
    follow_links: bool,
}

impl<P: EntryProbe> RootWorker<P> {
    pub fn new(id: usize, task: RootTask, probe: P, follow_links: bool) -> Self {
        Self {
            id,
            task,
            probe,
            follow_links,
        }
    }

    pub fn task(&self) -> &RootTask {
        &self.task
    }

    /// Walk the root and return its tally without touching shared state
    pub fn measure(&self, abort: &AtomicBool) -> Result<SizeTally> {
        let start = Instant::now();
        let depth_limit = self.task.depth_limit();

        let walker = TreeWalker::open(self.task.root(), depth_limit, self.follow_links)?;
        let tally = SizeAccumulator::new(&self.probe, depth_limit).accumulate_until(walker, abort)?;

        info!(
            worker = self.id,
            root = %self.task.root().display(),
            files = tally.files,
            total = %format_size(tally.total_size, BINARY),
            actual = %format_size(tally.actual_size, BINARY),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Measured root"
        );

        Ok(tally)
    }

    /// Measure, report, then add into the grand totals.
    ///
    /// On failure the abort flag is raised before the failure is reported,
    /// so siblings stop at their next entry.
    pub fn run(
        self,
        aggregate: &GlobalAggregator,
        events: &Sender<WorkerEvent>,
        abort: &AtomicBool,
    ) -> std::result::Result<(), WorkerError> {
        debug!(worker = self.id, root = %self.task.root().display(), "Worker started");

        let event = match self.measure(abort) {
            Ok(tally) => {
                let report = RootReport {
                    path: self.task.root,
                    tally,
                };
                let sent = events.send(WorkerEvent::Finished {
                    id: self.id,
                    report,
                });
                aggregate.add(&tally);
                sent
            }
            Err(error) => {
                abort.store(true, Ordering::SeqCst);
                if !matches!(error, WalkerError::Aborted) {
                    warn!(worker = self.id, "Worker failed: {}", error);
                }
                events.send(WorkerEvent::Failed { id: self.id, error })
            }
        };

        event.map_err(|_| WorkerError::ChannelClosed)?;
        debug!(worker = self.id, "Worker finished");
        Ok(())
    }
}
