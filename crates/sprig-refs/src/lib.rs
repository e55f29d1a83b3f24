//! Branch reference management for Sprig.
//!
//! Branches are mutable named pointers to commit ids. HEAD names the branch
//! currently checked out; every commit and merge advances that branch.
//!
//! # Modules
//!
//! - [`error`] -- Error types for ref operations
//! - [`traits`] -- The [`RefStore`] trait defining the storage interface
//! - [`names`] -- Branch name validation
//! - [`memory`] -- In-memory [`InMemoryRefStore`] for tests
//! - [`fs`] -- JSON-file backed [`FsRefStore`]

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{RefError, Result};
pub use fs::FsRefStore;
pub use memory::InMemoryRefStore;
pub use names::validate_branch_name;
pub use traits::RefStore;
