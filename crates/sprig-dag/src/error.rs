//! Error types for commit graph queries.

use sprig_store::StoreError;
use sprig_types::ObjectId;

/// Errors that can occur while walking the commit graph.
///
/// All of these mean the repository is damaged: the graph is expected to be
/// well formed and every commit to share the root commit.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A parent reference could not be resolved in the object store.
    #[error("commit not found: {0}")]
    CommitNotFound(ObjectId),

    /// The two histories share no commit.
    #[error("no common ancestor between {current} and {given}")]
    NoCommonAncestor { current: ObjectId, given: ObjectId },

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DagError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::CommitNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
