//! Configuration types for du-walker
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Run mode selection from the positional argument shape
//! - Depth limit parsing

use crate::error::ConfigError;
use crate::walker::RootTask;
use clap::Parser;
use std::path::PathBuf;

/// Disk usage walker reporting block-allocated and apparent sizes
#[derive(Parser, Debug, Clone)]
#[command(
    name = "du-walker",
    version,
    about = "Disk usage walker reporting block-allocated and apparent sizes",
    long_about = "Reports the total (block-allocated) and actual (apparent) size of files.\n\n\
                  With a single directory, every regular file directly inside it is listed.\n\
                  With a depth limit and one directory, the directory is walked down to the\n\
                  limit and its totals printed. With a depth limit and several directories,\n\
                  each directory is walked on its own thread and grand totals are printed.",
    after_help = "EXAMPLES:\n    \
        du-walker ./data\n    \
        du-walker 2 ./data\n    \
        du-walker 3 /var/log /var/cache /home"
)]
pub struct CliArgs {
    /// Optional depth limit followed by one or more directories
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Follow symbolic links to directories (links to files are always counted)
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// What the run does, decided once from the argument shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// `<dir>`: list the regular files directly inside `root`
    Listing { root: PathBuf },

    /// `<depth> <dir>`: walk one root on the calling thread
    Single { task: RootTask },

    /// `<depth> <dir1> ... <dirN>`: one worker thread per root
    Multi { tasks: Vec<RootTask> },
}

impl RunMode {
    /// Select the mode from the positional arguments
    pub fn from_positionals(args: &[String]) -> Result<Self, ConfigError> {
        match args {
            [] => Err(ConfigError::NotEnoughArguments),
            [dir] => Ok(RunMode::Listing {
                root: PathBuf::from(dir),
            }),
            [depth, dir] => Ok(RunMode::Single {
                task: RootTask::new(dir, parse_depth_limit(depth)?),
            }),
            [depth, dirs @ ..] => {
                let depth_limit = parse_depth_limit(depth)?;
                Ok(RunMode::Multi {
                    tasks: dirs.iter().map(|d| RootTask::new(d, depth_limit)).collect(),
                })
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Listing { .. } => "listing",
            RunMode::Single { .. } => "single",
            RunMode::Multi { .. } => "multi",
        }
    }

    /// Number of root paths this mode walks
    pub fn root_count(&self) -> usize {
        match self {
            RunMode::Listing { .. } | RunMode::Single { .. } => 1,
            RunMode::Multi { tasks } => tasks.len(),
        }
    }
}

/// Parse a depth limit as a non-negative integer
pub fn parse_depth_limit(value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidDepthLimit {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Selected run mode with its roots
    pub mode: RunMode,

    /// Descend into symlinked directories and classify every link by its target
    pub follow_links: bool,
}

impl WalkConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mode = RunMode::from_positionals(&args.args)?;

        Ok(Self {
            mode,
            follow_links: args.follow_links,
        })
    }

    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            follow_links: false,
        }
    }
}
