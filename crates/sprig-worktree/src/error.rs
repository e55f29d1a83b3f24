use std::path::PathBuf;

/// Errors from working tree operations.
#[derive(Debug, thiserror::Error)]
pub enum WorktreeError {
    /// A file not tracked by the current commit would be overwritten.
    #[error("untracked file in the way: {path}")]
    UntrackedFileInWay { path: String },

    /// A commit does not track the requested file.
    #[error("file {path} does not exist in that commit")]
    FileNotInCommit { path: String },

    /// The file name cannot be used in a flat working tree.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("working tree root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type WorktreeResult<T> = Result<T, WorktreeError>;
