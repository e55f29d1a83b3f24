//! High-level repository API for Sprig.
//!
//! [`Repository`] ties the object store, branch refs, staging area and
//! working tree together and exposes the user-level operations: add, rm,
//! commit, branch, checkout, log, status and merge. Repositories live either
//! on disk under a `.sprig` directory or entirely in memory.

pub mod summary;
pub mod config;
pub mod error;
pub mod repository;

pub use summary::{LogEntry, RepoStatus};
pub use config::{MergeConfig, SprigConfig};
pub use error::{SdkError, SdkResult};
pub use repository::{Repository, META_DIR};

// Re-export key types
pub use sprig_dag::TraversalOrder;
pub use sprig_index::{FileStatus, StatusEntry, WorkdirStatus};
pub use sprig_merge::MergeOutcome;
pub use sprig_store::{Blob, Commit, FileTable};
pub use sprig_types::ObjectId;
pub use sprig_worktree::Worktree;
