//! Entry metadata access
//!
//! The probe answers one question per path: is this a regular file, and if
//! so how many blocks and bytes does it take. Everything above it (walker,
//! accumulator, workers) goes through the [`EntryProbe`] trait so tests can
//! substitute exact block numbers for what the host filesystem reports.
//!
//! ```no_run
//! use du_walker::probe::{EntryProbe, FsProbe};
//! use std::path::Path;
//!
//! let probe = FsProbe;
//! let stat = probe.probe(Path::new("Cargo.toml")).unwrap();
//! println!("{} blocks of {} bytes", stat.block_count, stat.block_size);
//! ```

pub mod types;

use crate::error::{ProbeError, ProbeResult};
use std::fs::Metadata;
use std::path::Path;

pub use types::{DirectoryEntry, EntryStat, EntryType};

/// Block size assumed where the platform does not report one
#[cfg(not(unix))]
const FALLBACK_BLOCK_SIZE: u64 = 4096;

/// Retrieves size metadata for a single path
pub trait EntryProbe: Send + Sync {
    fn probe(&self, path: &Path) -> ProbeResult<EntryStat>;
}

impl<P: EntryProbe + ?Sized> EntryProbe for &P {
    fn probe(&self, path: &Path) -> ProbeResult<EntryStat> {
        (**self).probe(path)
    }
}

/// Probe backed by the local filesystem's stat
///
/// Symbolic links are resolved, so a link to a regular file reports the
/// target's blocks and bytes. The walker decides which links get probed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl EntryProbe for FsProbe {
    fn probe(&self, path: &Path) -> ProbeResult<EntryStat> {
        let metadata = std::fs::metadata(path).map_err(|source| ProbeError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(stat_from_metadata(&metadata))
    }
}

#[cfg(unix)]
fn stat_from_metadata(metadata: &Metadata) -> EntryStat {
    use std::os::unix::fs::MetadataExt;

    EntryStat {
        entry_type: EntryType::from_file_type(metadata.file_type()),
        block_size: metadata.blksize(),
        block_count: metadata.blocks(),
        apparent_size: metadata.size(),
    }
}

#[cfg(not(unix))]
fn stat_from_metadata(metadata: &Metadata) -> EntryStat {
    let len = metadata.len();

    EntryStat {
        entry_type: EntryType::from_file_type(metadata.file_type()),
        block_size: FALLBACK_BLOCK_SIZE,
        block_count: len.div_ceil(FALLBACK_BLOCK_SIZE),
        apparent_size: len,
    }
}
