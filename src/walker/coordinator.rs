//! Walk coordinator - runs the selected mode and reports the results
//!
//! The coordinator is responsible for:
//! - Dispatching on the run mode chosen at startup
//! - Spawning one worker per root in multi mode and joining all of them
//! - Writing per-file, per-root and grand total reports
//! - Surfacing the first fatal error
//!
//! # Multi mode
//!
//! ```text
//!  RootTask 0      RootTask 1            RootTask N
//!      │               │                     │
//! ┌────▼─────┐    ┌────▼─────┐          ┌────▼─────┐
//! │ worker 0 │    │ worker 1 │   ...    │ worker N │
//! └──┬────┬──┘    └──┬────┬──┘          └──┬────┬──┘
//!    │    │ fetch_add │    │                │    │
//!    │    └──────────►│ GlobalAggregator ◄─┘    │
//!    │                │                         │
//!    └────────────────┴──── WorkerEvent ────────┘
//!                           channel
//!                              │
//!                              ▼
//!                   coordinator (prints reports,
//!                   joins, prints grand total)
//! ```

use crate::config::{RunMode, WalkConfig};
use crate::error::{Result, WalkerError, WorkerError};
use crate::probe::{EntryProbe, FsProbe};
use crate::report::{write_file_report, write_grand_total, write_root_report, FileReport};
use crate::walker::accumulate::SizeTally;
use crate::walker::aggregate::GlobalAggregator;
use crate::walker::tree::TreeWalker;
use crate::walker::worker::{RootReport, RootTask, RootWorker, WorkerEvent};
use crossbeam_channel::unbounded;
use std::any::Any;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info};

/// What a run produced, mirroring what was printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Regular files directly inside the root
    Listing(Vec<FileReport>),

    /// Totals of the one root
    Single(RootReport),

    /// Per-root totals in completion order, plus the grand total
    Multi {
        roots: Vec<RootReport>,
        total: SizeTally,
    },
}

/// Coordinates one run
pub struct Coordinator<P = FsProbe> {
    config: WalkConfig,
    probe: P,
}

impl Coordinator<FsProbe> {
    /// Create a coordinator probing the local filesystem
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config,
            probe: FsProbe,
        }
    }
}

impl<P: EntryProbe> Coordinator<P> {
    /// Create a coordinator with a custom probe
    pub fn with_probe(config: WalkConfig, probe: P) -> Self {
        Self { config, probe }
    }

    /// Run the selected mode, writing reports to `out`
    pub fn run<W: Write>(mut self, out: &mut W) -> Result<RunOutcome> {
        let start = Instant::now();
        let mode = std::mem::replace(&mut self.config.mode, RunMode::Multi { tasks: Vec::new() });

        info!(
            mode = mode.name(),
            roots = mode.root_count(),
            follow_links = self.config.follow_links,
            "Starting walk"
        );

        let outcome = match mode {
            RunMode::Listing { root } => self.run_listing(&root, out)?,
            RunMode::Single { task } => self.run_single(task, out)?,
            RunMode::Multi { tasks } => self.run_multi(tasks, out)?,
        };

        out.flush()?;
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Walk finished");

        Ok(outcome)
    }

    /// List the regular files directly inside `root`, one report each
    fn run_listing<W: Write>(&self, root: &Path, out: &mut W) -> Result<RunOutcome> {
        let walker = TreeWalker::open(root, 1, self.config.follow_links)?;
        let mut files = Vec::new();

        for entry in walker {
            let entry = entry?;
            if !entry.is_regular_file() {
                continue;
            }

            let stat = self.probe.probe(&entry.path)?;
            let report = FileReport {
                path: entry.path,
                total_size: stat.total_size(),
                actual_size: stat.apparent_size,
            };
            write_file_report(out, &report)?;
            files.push(report);
        }

        debug!(files = files.len(), "Listing complete");
        Ok(RunOutcome::Listing(files))
    }

    /// Measure one root on the calling thread
    fn run_single<W: Write>(&self, task: RootTask, out: &mut W) -> Result<RunOutcome> {
        let worker = RootWorker::new(0, task, &self.probe, self.config.follow_links);
        let tally = worker.measure(&AtomicBool::new(false))?;

        let report = RootReport {
            path: worker.task().root().to_path_buf(),
            tally,
        };
        write_root_report(out, &report)?;

        Ok(RunOutcome::Single(report))
    }

    /// Measure every root on its own thread and print the grand total
    fn run_multi<W: Write>(&self, tasks: Vec<RootTask>, out: &mut W) -> Result<RunOutcome> {
        let aggregate = GlobalAggregator::new();
        let abort = AtomicBool::new(false);
        let worker_count = tasks.len();

        let roots = thread::scope(|scope| -> Result<Vec<RootReport>> {
            let (event_tx, event_rx) = unbounded::<WorkerEvent>();
            let mut handles = Vec::with_capacity(worker_count);
            let mut first_error: Option<WalkerError> = None;

            for (id, task) in tasks.into_iter().enumerate() {
                let worker = RootWorker::new(id, task, &self.probe, self.config.follow_links);
                let event_tx = event_tx.clone();
                let aggregate = &aggregate;
                let abort = &abort;

                let spawned = thread::Builder::new()
                    .name(format!("root-worker-{}", id))
                    .spawn_scoped(scope, move || worker.run(aggregate, &event_tx, abort));

                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(e) => {
                        abort.store(true, Ordering::SeqCst);
                        first_error = Some(
                            WorkerError::SpawnFailed {
                                id,
                                reason: e.to_string(),
                            }
                            .into(),
                        );
                        break;
                    }
                }
            }

            debug!(spawned = handles.len(), "Workers spawned");

            // Channel closes once every worker has dropped its sender
            drop(event_tx);

            let mut reports = Vec::with_capacity(handles.len());
            for event in event_rx.iter() {
                match event {
                    WorkerEvent::Finished { id, report } => {
                        debug!(worker = id, "Root report received");
                        if first_error.is_none() {
                            if let Err(e) = write_root_report(out, &report) {
                                abort.store(true, Ordering::SeqCst);
                                first_error = Some(e.into());
                            }
                        }
                        reports.push(report);
                    }
                    WorkerEvent::Failed { id, error } => {
                        // Aborted siblings may report before the worker that
                        // caused the abort does
                        if matches!(first_error, None | Some(WalkerError::Aborted)) {
                            error!(worker = id, "{}", error);
                            first_error = Some(error);
                        }
                    }
                }
            }

            for (id, handle) in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        first_error.get_or_insert(e.into());
                    }
                    Err(panic) => {
                        abort.store(true, Ordering::SeqCst);
                        let message = panic_message(panic.as_ref());
                        error!(worker = id, "Worker panicked: {}", message);
                        first_error.get_or_insert(WorkerError::Panicked { id, message }.into());
                    }
                }
            }

            match first_error {
                Some(e) => Err(e),
                None => Ok(reports),
            }
        })?;

        // Every worker has been joined, the totals are final
        let total = aggregate.snapshot();
        write_grand_total(out, &total)?;

        info!(
            roots = roots.len(),
            files = total.files,
            total = total.total_size,
            actual = total.actual_size,
            "All roots measured"
        );

        Ok(RunOutcome::Multi { roots, total })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
