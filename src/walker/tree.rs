//! Depth-bounded directory enumeration
//!
//! [`TreeWalker`] is a lazy, depth-first iterator over the descendants of a
//! root directory. It keeps an explicit stack of open directory handles, each
//! tagged with its depth, so the depth of every yielded entry is known
//! without asking the platform iterator.
//!
//! ```text
//! root (depth 0, opened eagerly)
//! ├── a.txt        depth 1  yielded
//! └── sub/         depth 1  yielded, pushed if 1 < max_depth
//!     └── b.txt    depth 2  yielded only when max_depth >= 2
//! ```
//!
//! Directories are only descended into when their children can still be
//! within the limit, so nothing deeper than `max_depth` is ever yielded.
//!
//! Symbolic links are classified by their target when it is a regular file.
//! Links to directories are only descended with `follow_links`; dangling or
//! unresolvable links are yielded as [`EntryType::Symlink`].

use crate::error::WalkError;
use crate::probe::{DirectoryEntry, EntryType};
use std::fs::{self, DirEntry, ReadDir};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// An open directory on the walk stack
#[derive(Debug)]
struct OpenDir {
    path: PathBuf,
    entries: ReadDir,
    depth: u32,
}

/// Lazy depth-first walker bounded by a maximum depth
#[derive(Debug)]
pub struct TreeWalker {
    max_depth: u32,
    follow_links: bool,
    stack: Vec<OpenDir>,
}

impl TreeWalker {
    /// Open `root` and prepare to walk it down to `max_depth`.
    ///
    /// Fails with [`WalkError::DirectoryOpen`] if `root` does not exist or
    /// is not a directory. With `max_depth == 0` the root is still opened
    /// (so a bad root is reported) but nothing is yielded.
    pub fn open(
        root: impl Into<PathBuf>,
        max_depth: u32,
        follow_links: bool,
    ) -> Result<Self, WalkError> {
        let root = root.into();
        let entries = open_dir(&root)?;

        let mut stack = Vec::new();
        if max_depth > 0 {
            stack.push(OpenDir {
                path: root.clone(),
                entries,
                depth: 0,
            });
        }

        debug!(root = %root.display(), max_depth, follow_links, "Opened walk root");

        Ok(Self {
            max_depth,
            follow_links,
            stack,
        })
    }

    fn entry_type(&self, dirent: &DirEntry) -> io::Result<EntryType> {
        let entry_type = EntryType::from_file_type(dirent.file_type()?);
        if !entry_type.is_symlink() {
            return Ok(entry_type);
        }

        match fs::metadata(dirent.path()) {
            Ok(metadata) => {
                let target = EntryType::from_file_type(metadata.file_type());
                if self.follow_links || target.is_file() {
                    Ok(target)
                } else {
                    Ok(EntryType::Symlink)
                }
            }
            // Dangling link: keep it as a link, it has nothing to count
            Err(e) if !self.follow_links || e.kind() == io::ErrorKind::NotFound => {
                Ok(EntryType::Symlink)
            }
            Err(e) => Err(e),
        }
    }

    /// Stop the walk after an error so the iterator is fused
    fn fail(&mut self, error: WalkError) -> Option<Result<DirectoryEntry, WalkError>> {
        self.stack.clear();
        Some(Err(error))
    }
}

impl Iterator for TreeWalker {
    type Item = Result<DirectoryEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let depth = top.depth + 1;

            let dirent = match top.entries.next() {
                None => {
                    trace!(path = %top.path.display(), "Directory exhausted");
                    self.stack.pop();
                    continue;
                }
                Some(Err(source)) => {
                    let path = top.path.clone();
                    return self.fail(WalkError::ReadEntry { path, source });
                }
                Some(Ok(dirent)) => dirent,
            };

            let path = dirent.path();
            let entry_type = match self.entry_type(&dirent) {
                Ok(entry_type) => entry_type,
                Err(source) => return self.fail(WalkError::ReadEntry { path, source }),
            };

            if entry_type.is_dir() && depth < self.max_depth {
                match open_dir(&path) {
                    Ok(entries) => self.stack.push(OpenDir {
                        path: path.clone(),
                        entries,
                        depth,
                    }),
                    Err(e) => return self.fail(e),
                }
            }

            return Some(Ok(DirectoryEntry::new(path, entry_type, depth)));
        }
    }
}

fn open_dir(path: &Path) -> Result<ReadDir, WalkError> {
    fs::read_dir(path).map_err(|source| WalkError::DirectoryOpen {
        path: path.to_path_buf(),
        source,
    })
}
