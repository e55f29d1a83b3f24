use sprig_merge::MergeError;
use sprig_refs::RefError;
use sprig_worktree::WorktreeError;
use thiserror::Error;

const UNTRACKED_IN_WAY: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.";

#[derive(Debug, Error)]
pub enum SdkError {
    /// The operation was refused; the message is meant for the user as is.
    #[error("{0}")]
    User(String),

    #[error("not a sprig repository: {0}")]
    NotInitialized(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),

    #[error("ref error: {0}")]
    Ref(RefError),

    #[error("index error: {0}")]
    Index(#[from] sprig_index::IndexError),

    #[error("working tree error: {0}")]
    Worktree(WorktreeError),

    #[error("commit graph error: {0}")]
    Dag(#[from] sprig_dag::DagError),

    #[error("merge error: {0}")]
    Merge(MergeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    pub(crate) fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }

    /// Returns `true` for refusals the user can act on, as opposed to a
    /// damaged repository or I/O failure.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<RefError> for SdkError {
    fn from(err: RefError) -> Self {
        match err {
            RefError::InvalidBranchName { .. } => Self::User(err.to_string()),
            other => Self::Ref(other),
        }
    }
}

impl From<WorktreeError> for SdkError {
    fn from(err: WorktreeError) -> Self {
        match err {
            WorktreeError::UntrackedFileInWay { .. } => Self::user(UNTRACKED_IN_WAY),
            WorktreeError::InvalidName(_) => Self::User(err.to_string()),
            other => Self::Worktree(other),
        }
    }
}

impl From<MergeError> for SdkError {
    fn from(err: MergeError) -> Self {
        if err.is_user_error() {
            Self::User(err.to_string())
        } else {
            Self::Merge(err)
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
