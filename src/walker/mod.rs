//! Depth-bounded disk usage walker
//!
//! # Architecture
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │       Coordinator       │
//!                     │  - picks the run mode   │
//!                     │  - joins all workers    │
//!                     └───────────┬─────────────┘
//!                                 │ RootTask
//!       ┌─────────────────────────┼─────────────────────────┐
//!       │                         │                         │
//! ┌─────▼─────┐             ┌─────▼─────┐             ┌─────▼─────┐
//! │ Worker 0  │             │ Worker 1  │             │ Worker N  │
//! │ TreeWalker│             │ TreeWalker│             │ TreeWalker│
//! │ SizeAccum │             │ SizeAccum │             │ SizeAccum │
//! └─────┬─────┘             └─────┬─────┘             └─────┬─────┘
//!       └─────────────── GlobalAggregator ──────────────────┘
//! ```

pub mod accumulate;
pub mod aggregate;
pub mod coordinator;
pub mod tree;
pub mod worker;

pub use accumulate::{SizeAccumulator, SizeTally};
pub use aggregate::GlobalAggregator;
pub use coordinator::{Coordinator, RunOutcome};
pub use tree::TreeWalker;
pub use worker::{RootReport, RootTask, RootWorker, WorkerEvent};
