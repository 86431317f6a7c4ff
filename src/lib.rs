//! du-walker - Concurrent Disk Usage Walker
//!
//! Computes the block-allocated ("total") and apparent ("actual") size of
//! one or more directory trees, down to a depth limit, with one worker
//! thread per root directory.
//!
//! # Modes
//!
//! - **Listing** (`du-walker <dir>`): every regular file directly inside
//!   `<dir>` with its own sizes. No recursion.
//!
//! - **Single** (`du-walker <depth> <dir>`): totals for `<dir>`, counting
//!   regular files down to `<depth>` (direct children are depth 1).
//!
//! - **Multi** (`du-walker <depth> <dir1> ... <dirN>`): totals for every
//!   directory, measured concurrently, followed by grand totals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Coordinator                             │
//! │                 (mode chosen once at startup)                    │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ one RootTask per root
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Root Workers                              │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐         ┌─────────┐     │
//! │  │Worker 0 │  │Worker 1 │  │Worker 2 │  ...    │Worker N │     │
//! │  │ walker  │  │ walker  │  │ walker  │         │ walker  │     │
//! │  │ + tally │  │ + tally │  │ + tally │         │ + tally │     │
//! │  └────┬────┘  └────┬────┘  └────┬────┘         └────┬────┘     │
//! │       │            │            │                    │          │
//! │       └────────────┴─────┬──────┴────────────────────┘          │
//! │                          │ fetch_add                            │
//! │                          ▼                                      │
//! │            ┌──────────────────────────┐                         │
//! │            │    GlobalAggregator      │                         │
//! │            │  (read after join only)  │                         │
//! │            └──────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use du_walker::config::{RunMode, WalkConfig};
//! use du_walker::walker::{Coordinator, RootTask, RunOutcome};
//!
//! let mode = RunMode::Multi {
//!     tasks: vec![RootTask::new("/var/log", 2), RootTask::new("/var/cache", 2)],
//! };
//! let mut out = std::io::stdout();
//! if let RunOutcome::Multi { total, .. } = Coordinator::new(WalkConfig::new(mode)).run(&mut out)? {
//!     println!("{} bytes apparent", total.actual_size);
//! }
//! # Ok::<(), du_walker::WalkerError>(())
//! ```

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod walker;

pub use config::{CliArgs, RunMode, WalkConfig};
pub use error::{Result, WalkerError};
pub use walker::{Coordinator, RootTask, RunOutcome, SizeTally};
