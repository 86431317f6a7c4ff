//! Folding walker entries into size totals

use crate::error::{ProbeResult, Result, WalkError, WalkerError};
use crate::probe::{DirectoryEntry, EntryProbe, EntryStat};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Running size totals for one root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeTally {
    /// Sum of block size × block count over contributing files
    pub total_size: u64,

    /// Sum of apparent sizes over contributing files
    pub actual_size: u64,

    /// Number of contributing regular files
    pub files: u64,
}

impl SizeTally {
    /// Count one regular file
    pub fn add_stat(&mut self, stat: &EntryStat) {
        self.total_size = self.total_size.saturating_add(stat.total_size());
        self.actual_size = self.actual_size.saturating_add(stat.apparent_size);
        self.files += 1;
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &SizeTally) {
        self.total_size = self.total_size.saturating_add(other.total_size);
        self.actual_size = self.actual_size.saturating_add(other.actual_size);
        self.files = self.files.saturating_add(other.files);
    }
}

/// Folds a [`DirectoryEntry`] sequence into a [`SizeTally`]
///
/// Only regular files at or above `depth_limit` are probed; everything else
/// passes through untouched. Any walk or probe error ends accumulation.
#[derive(Debug)]
pub struct SizeAccumulator<P> {
    probe: P,
    depth_limit: u32,
    tally: SizeTally,
}

impl<P: EntryProbe> SizeAccumulator<P> {
    pub fn new(probe: P, depth_limit: u32) -> Self {
        Self {
            probe,
            depth_limit,
            tally: SizeTally::default(),
        }
    }

    /// Add a single entry. Returns whether it contributed to the tally.
    pub fn add(&mut self, entry: &DirectoryEntry) -> ProbeResult<bool> {
        if !entry.is_regular_file() || entry.depth > self.depth_limit {
            return Ok(false);
        }

        let stat = self.probe.probe(&entry.path)?;
        trace!(
            path = %entry.path.display(),
            depth = entry.depth,
            total = stat.total_size(),
            actual = stat.apparent_size,
            "Counted file"
        );
        self.tally.add_stat(&stat);
        Ok(true)
    }

    /// Consume the whole sequence and return the final tally
    pub fn accumulate<I>(self, entries: I) -> Result<SizeTally>
    where
        I: IntoIterator<Item = std::result::Result<DirectoryEntry, WalkError>>,
    {
        self.accumulate_until(entries, &AtomicBool::new(false))
    }

    /// Like [`accumulate`](Self::accumulate), but gives up with
    /// [`WalkerError::Aborted`] as soon as `abort` is raised.
    pub fn accumulate_until<I>(mut self, entries: I, abort: &AtomicBool) -> Result<SizeTally>
    where
        I: IntoIterator<Item = std::result::Result<DirectoryEntry, WalkError>>,
    {
        for entry in entries {
            if abort.load(Ordering::Relaxed) {
                return Err(WalkerError::Aborted);
            }
            self.add(&entry?)?;
        }

        Ok(self.tally)
    }

    /// Tally so far
    pub fn tally(&self) -> SizeTally {
        self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::probe::EntryType;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// Probe returning canned stats keyed by path
    struct FakeProbe(HashMap<PathBuf, EntryStat>);

    impl EntryProbe for FakeProbe {
        fn probe(&self, path: &Path) -> ProbeResult<EntryStat> {
            self.0.get(path).copied().ok_or_else(|| ProbeError::Stat {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn file_stat(block_size: u64, block_count: u64, apparent_size: u64) -> EntryStat {
        EntryStat {
            entry_type: EntryType::File,
            block_size,
            block_count,
            apparent_size,
        }
    }

    fn file(path: &str, depth: u32) -> std::result::Result<DirectoryEntry, WalkError> {
        Ok(DirectoryEntry::new(path.into(), EntryType::File, depth))
    }

    fn probe() -> FakeProbe {
        FakeProbe(HashMap::from([
            (PathBuf::from("/r/a"), file_stat(4096, 1, 10)),
            (PathBuf::from("/r/d/b"), file_stat(4096, 2, 5000)),
            (PathBuf::from("/r/d/e/c"), file_stat(512, 3, 1500)),
        ]))
    }

    #[test]
    fn test_block_math() {
        let entries = vec![file("/r/a", 1), file("/r/d/b", 2), file("/r/d/e/c", 3)];
        let tally = SizeAccumulator::new(probe(), 5).accumulate(entries).unwrap();

        assert_eq!(tally.total_size, 4096 + 8192 + 1536);
        assert_eq!(tally.actual_size, 10 + 5000 + 1500);
        assert_eq!(tally.files, 3);
        assert!(tally.total_size >= tally.actual_size);
    }

    #[test]
    fn test_entries_past_limit_are_ignored() {
        let entries = vec![file("/r/a", 1), file("/r/d/b", 2), file("/r/d/e/c", 3)];
        let tally = SizeAccumulator::new(probe(), 2).accumulate(entries).unwrap();

        assert_eq!(tally.actual_size, 5010);
        assert_eq!(tally.files, 2);
    }

    #[test]
    fn test_non_files_are_not_probed() {
        // The fake probe knows nothing about these paths, so probing would fail
        let entries = vec![
            Ok(DirectoryEntry::new("/r/d".into(), EntryType::Directory, 1)),
            Ok(DirectoryEntry::new("/r/link".into(), EntryType::Symlink, 1)),
            Ok(DirectoryEntry::new("/r/fifo".into(), EntryType::Other, 1)),
        ];
        let tally = SizeAccumulator::new(probe(), 5).accumulate(entries).unwrap();
        assert_eq!(tally, SizeTally::default());
    }

    #[test]
    fn test_probe_failure_is_fatal() {
        let entries = vec![file("/r/a", 1), file("/r/vanished", 1)];
        let err = SizeAccumulator::new(probe(), 5)
            .accumulate(entries)
            .unwrap_err();
        assert!(matches!(err, WalkerError::Probe(_)));
    }

    #[test]
    fn test_walk_failure_is_fatal() {
        let entries = vec![
            file("/r/a", 1),
            Err(WalkError::DirectoryOpen {
                path: "/r/d".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
        ];
        let err = SizeAccumulator::new(probe(), 5)
            .accumulate(entries)
            .unwrap_err();
        assert!(matches!(err, WalkerError::Walk(_)));
    }

    #[test]
    fn test_abort_flag_stops_accumulation() {
        let abort = AtomicBool::new(true);
        let err = SizeAccumulator::new(probe(), 5)
            .accumulate_until(vec![file("/r/a", 1)], &abort)
            .unwrap_err();
        assert!(matches!(err, WalkerError::Aborted));
    }

    #[test]
    fn test_add_reports_contribution() {
        let mut acc = SizeAccumulator::new(probe(), 1);
        let inside = DirectoryEntry::new("/r/a".into(), EntryType::File, 1);
        let outside = DirectoryEntry::new("/r/d/b".into(), EntryType::File, 2);

        assert!(acc.add(&inside).unwrap());
        assert!(!acc.add(&outside).unwrap());
        assert_eq!(acc.tally().files, 1);
    }

    #[test]
    fn test_merge() {
        let mut a = SizeTally {
            total_size: 10,
            actual_size: 5,
            files: 1,
        };
        a.merge(&SizeTally {
            total_size: 20,
            actual_size: 7,
            files: 2,
        });
        assert_eq!(
            a,
            SizeTally {
                total_size: 30,
                actual_size: 12,
                files: 3
            }
        );
    }
}
