//! Working directory status types.
//!
//! These types describe the working tree relative to the head commit and the
//! staging area. Computing them needs the working tree, so that happens in
//! the repository layer.

use serde::{Deserialize, Serialize};

/// Complete status of the working directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkdirStatus {
    /// Files staged for addition, with how they differ from the head commit.
    pub staged: Vec<StatusEntry>,
    /// Files staged for removal.
    pub removed: Vec<String>,
    /// Tracked files whose working content differs from what would be
    /// committed, or that were deleted without `rm`.
    pub unstaged: Vec<StatusEntry>,
    /// Files present in the working directory but neither tracked nor staged.
    pub untracked: Vec<String>,
    /// Staged files carrying conflict markers.
    pub conflicts: Vec<String>,
}

impl WorkdirStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single status entry representing a file change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub path: String,
    pub status: FileStatus,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// The kind of file change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    New,
    Modified,
    Deleted,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new file"),
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}
