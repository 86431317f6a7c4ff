//! Integration tests for du-walker
//!
//! These tests build real directory trees with tempfile and drive the
//! library through the coordinator, comparing against an independent
//! recursive walk.

use du_walker::config::{RunMode, WalkConfig};
use du_walker::error::ProbeResult;
use du_walker::probe::{EntryProbe, EntryStat, FsProbe};
use du_walker::walker::{
    Coordinator, RootTask, RunOutcome, SizeAccumulator, SizeTally, TreeWalker,
};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::{tempdir, TempDir};

/// Build a tree of `depth` nested levels, `width` files per level
fn build_tree(depth: u32, width: usize, seed: usize) -> TempDir {
    let dir = tempdir().unwrap();
    let mut level = dir.path().to_path_buf();
    for d in 1..=depth {
        for i in 0..width {
            let len = (seed * 31 + d as usize * 17 + i * 7) % 5000;
            fs::write(level.join(format!("f{}_{}.dat", d, i)), vec![b'x'; len]).unwrap();
        }
        level = level.join(format!("level{}", d));
        fs::create_dir(&level).unwrap();
    }
    dir
}

/// Apparent bytes of regular files at depth <= limit, by plain recursion
fn reference_actual_size(dir: &Path, depth: u32, limit: u32) -> u64 {
    let mut sum = 0;
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let file_type = entry.file_type().unwrap();
        if file_type.is_file() && depth < limit {
            sum += entry.metadata().unwrap().len();
        } else if file_type.is_dir() {
            sum += reference_actual_size(&entry.path(), depth + 1, limit);
        }
    }
    sum
}

fn run(mode: RunMode) -> RunOutcome {
    let mut out = Vec::new();
    Coordinator::new(WalkConfig::new(mode)).run(&mut out).unwrap()
}

fn single(root: &Path, limit: u32) -> SizeTally {
    match run(RunMode::Single {
        task: RootTask::new(root, limit),
    }) {
        RunOutcome::Single(report) => report.tally,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_actual_size_matches_reference_walk() {
    let dir = build_tree(4, 3, 1);
    for limit in 0..=5 {
        let tally = single(dir.path(), limit);
        assert_eq!(
            tally.actual_size,
            reference_actual_size(dir.path(), 0, limit),
            "limit {}",
            limit
        );
    }
}

#[test]
fn test_depth_boundary() {
    // root/{a, mid/{b, deep/{leaf}}}: leaf sits at depth 3
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("mid/deep")).unwrap();
    fs::write(root.join("a"), [0u8; 1]).unwrap();
    fs::write(root.join("mid/b"), [0u8; 10]).unwrap();
    fs::write(root.join("mid/deep/leaf"), [0u8; 100]).unwrap();

    assert_eq!(single(root, 1).actual_size, 1);
    assert_eq!(single(root, 2).actual_size, 11);
    assert_eq!(single(root, 3).actual_size, 111);
}

/// Records every stat it hands out
struct RecordingProbe {
    seen: Mutex<Vec<EntryStat>>,
}

impl EntryProbe for RecordingProbe {
    fn probe(&self, path: &Path) -> ProbeResult<EntryStat> {
        let stat = FsProbe::default().probe(path)?;
        self.seen.lock().unwrap().push(stat);
        Ok(stat)
    }
}

#[test]
fn test_total_contribution_is_whole_blocks() {
    let dir = build_tree(3, 4, 2);
    let probe = RecordingProbe {
        seen: Mutex::new(Vec::new()),
    };

    let walker = TreeWalker::open(dir.path(), 3, false).unwrap();
    let tally = SizeAccumulator::new(&probe, 3).accumulate(walker).unwrap();

    let seen = probe.seen.into_inner().unwrap();
    assert_eq!(seen.len() as u64, tally.files);
    assert_eq!(
        tally.total_size,
        seen.iter().map(|s| s.block_size * s.block_count).sum::<u64>()
    );
    for stat in &seen {
        assert!(stat.block_size > 0);
        assert_eq!(stat.total_size() % stat.block_size, 0);
    }
}

#[test]
fn test_multi_matches_sum_of_singles() {
    let roots: Vec<TempDir> = (0..8).map(|seed| build_tree(3, 2, seed)).collect();
    let limit = 2;

    let mut expected = SizeTally::default();
    for root in &roots {
        expected.merge(&single(root.path(), limit));
    }

    for _ in 0..100 {
        let tasks = roots.iter().map(|r| RootTask::new(r.path(), limit)).collect();
        let RunOutcome::Multi { roots: reports, total } = run(RunMode::Multi { tasks }) else {
            panic!("expected multi outcome");
        };
        assert_eq!(reports.len(), 8);
        assert_eq!(total, expected);
    }
}

#[test]
fn test_listing_reports_direct_files_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), [0u8; 10]).unwrap();
    fs::write(dir.path().join("b"), [0u8; 20]).unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/c"), [0u8; 40]).unwrap();

    let RunOutcome::Listing(mut files) = run(RunMode::Listing {
        root: dir.path().to_path_buf(),
    }) else {
        panic!("expected listing outcome");
    };
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(files[0].actual_size, 10);
    assert_eq!(files[1].actual_size, 20);
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = tempdir().unwrap();
    let mut out = Vec::new();
    let result = Coordinator::new(WalkConfig::new(RunMode::Single {
        task: RootTask::new(dir.path().join("nope"), 3),
    }))
    .run(&mut out);

    assert!(result.is_err());
    assert!(out.is_empty());
}
