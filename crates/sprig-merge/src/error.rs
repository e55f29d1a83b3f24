//! Error types for merging.

use sprig_dag::DagError;
use sprig_index::IndexError;
use sprig_refs::RefError;
use sprig_store::StoreError;
use sprig_worktree::WorktreeError;

/// Errors that can occur during a merge.
///
/// The first four variants are user errors: the merge was refused before
/// anything was changed, and the message is meant to be shown verbatim.
/// The rest indicate a damaged repository or an I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("A branch with that name does not exist.")]
    BranchNotFound { name: String },

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInWay { path: String },

    #[error("commit graph error: {0}")]
    Dag(#[from] DagError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("ref error: {0}")]
    Refs(#[from] RefError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("working tree error: {0}")]
    Worktree(WorktreeError),
}

impl MergeError {
    /// Returns `true` if the merge was refused for a reason the user can
    /// fix, as opposed to an internal failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BranchNotFound { .. }
                | Self::SelfMerge
                | Self::UncommittedChanges
                | Self::UntrackedFileInWay { .. }
        )
    }
}

impl From<WorktreeError> for MergeError {
    fn from(err: WorktreeError) -> Self {
        match err {
            WorktreeError::UntrackedFileInWay { path } => Self::UntrackedFileInWay { path },
            other => Self::Worktree(other),
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
