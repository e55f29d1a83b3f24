//! Staging area for Sprig.
//!
//! The index records which file versions are queued for the next commit:
//! staged additions (name to blob id) and staged removals. It is the mutable
//! context a merge writes its results into, and it must be empty before a
//! merge starts.
//!
//! # Key Types
//!
//! - [`Index`] -- The staging area (BTreeMap-backed, persisted with bincode)
//! - [`IndexEntry`] -- A staged file with its flags
//! - [`WorkdirStatus`] -- Result of status computation

pub mod entry;
pub mod error;
pub mod index;
pub mod status;

pub use entry::{IndexEntry, IndexFlags};
pub use error::{IndexError, IndexResult};
pub use index::Index;
pub use status::{FileStatus, StatusEntry, WorkdirStatus};
