//! Filesystem entry types and data structures
//!
//! These types represent what the walker and the probe report about an
//! entry. They are small and `Copy`-friendly so they can be produced per
//! entry without allocation beyond the path itself.

use std::fs::FileType;
use std::path::{Path, PathBuf};

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntryType {
    /// Regular file
    File = 0,
    /// Directory
    Directory = 1,
    /// Symbolic link (only seen when links are not followed)
    Symlink = 2,
    /// Block/char device, FIFO, socket, ...
    Other = 255,
}

impl EntryType {
    /// Convert from a std file type
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_file() {
            EntryType::File
        } else if file_type.is_dir() {
            EntryType::Directory
        } else if file_type.is_symlink() {
            EntryType::Symlink
        } else {
            EntryType::Other
        }
    }

    /// Check if this is a regular file
    pub fn is_file(&self) -> bool {
        *self == EntryType::File
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryType::Directory
    }

    /// Check if this is a symbolic link
    pub fn is_symlink(&self) -> bool {
        *self == EntryType::Symlink
    }
}

/// Size information for a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    /// Entry type as seen by the probe
    pub entry_type: EntryType,

    /// Preferred I/O block size (`st_blksize`)
    pub block_size: u64,

    /// Number of blocks allocated (`st_blocks`)
    pub block_count: u64,

    /// Logical length in bytes (`st_size`)
    pub apparent_size: u64,
}

impl EntryStat {
    /// Block-allocated size: block size times block count
    pub fn total_size(&self) -> u64 {
        self.block_size.saturating_mul(self.block_count)
    }

    /// Check if the probed entry is a regular file
    pub fn is_regular_file(&self) -> bool {
        self.entry_type.is_file()
    }
}

/// A directory entry produced by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Full path (root path joined with the relative components)
    pub path: PathBuf,

    /// Entry type
    pub entry_type: EntryType,

    /// Depth from the root (root's direct children = 1)
    pub depth: u32,
}

impl DirectoryEntry {
    pub fn new(path: PathBuf, entry_type: EntryType, depth: u32) -> Self {
        Self {
            path,
            entry_type,
            depth,
        }
    }

    /// Check if this is a regular file
    pub fn is_regular_file(&self) -> bool {
        self.entry_type.is_file()
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        self.entry_type.is_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
