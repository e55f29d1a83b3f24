//! Content-addressed object storage for Sprig.
//!
//! Every blob and commit is stored as an immutable object identified by the
//! domain-separated BLAKE3 hash of its serialized form.
//!
//! # Object Types
//!
//! - [`Blob`] -- file content plus the name it was staged under
//! - [`Commit`] -- message, timestamp, up to two parents and a flat file table
//!
//! # Storage Backends
//!
//! Both backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsObjectStore`] -- one file per object under `.sprig/objects/`
//!
//! Objects are never deleted; there is no garbage collection.

pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Commit, FileTable, ObjectKind, StoredObject};
pub use traits::ObjectStore;
