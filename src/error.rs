//! Error types for du-walker
//!
//! This module defines the error hierarchy for:
//! - Directory traversal errors
//! - Per-entry metadata (probe) errors
//! - Configuration and CLI errors
//! - Worker thread errors
//!
//! Every error is fatal. The walker never skips an entry it could not read,
//! so each variant carries enough context to tell the user which path broke.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for du-walker
#[derive(Error, Debug)]
pub enum WalkerError {
    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    /// Metadata lookup errors
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (writing reports, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stopped because a sibling worker failed
    #[error("Walk aborted after another worker failed")]
    Aborted,
}

/// Directory traversal errors
#[derive(Error, Debug)]
pub enum WalkError {
    /// Path could not be opened as a directory
    #[error("Cannot open the directory '{path}': {source}")]
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing failed part way through a directory
    #[error("Failed to read an entry of '{path}': {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WalkError {
    /// The directory this error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            WalkError::DirectoryOpen { path, .. } => path,
            WalkError::ReadEntry { path, .. } => path,
        }
    }
}

/// Metadata lookup errors
#[derive(Error, Debug)]
pub enum ProbeError {
    /// stat failed (entry vanished, permission denied, ...)
    #[error("Failed to stat '{path}': {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No directory given
    #[error("Not enough arguments")]
    NotEnoughArguments,

    /// Depth limit is not a non-negative integer
    #[error("Invalid depth limit '{value}': {reason}")]
    InvalidDepthLimit { value: String, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Thread could not be created
    #[error("Failed to create worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },

    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Report channel closed before all workers reported
    #[error("Report channel closed unexpectedly")]
    ChannelClosed,
}

/// Result type alias for WalkerError
pub type Result<T> = std::result::Result<T, WalkerError>;

/// Result type alias for ProbeError
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let walk_err = WalkError::DirectoryOpen {
            path: "/missing".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let err: WalkerError = walk_err.into();
        assert!(matches!(err, WalkerError::Walk(_)));

        let err: WalkerError = ConfigError::NotEnoughArguments.into();
        assert!(matches!(err, WalkerError::Config(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = WalkError::DirectoryOpen {
            path: "/nope".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("Cannot open the directory '/nope'"));
        assert_eq!(err.path(), std::path::Path::new("/nope"));

        let err = ConfigError::InvalidDepthLimit {
            value: "-1".into(),
            reason: "invalid digit found in string".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid depth limit '-1': invalid digit found in string"
        );
    }
}
