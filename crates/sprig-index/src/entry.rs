//! Staged entry types.

use serde::{Deserialize, Serialize};
use sprig_types::ObjectId;

/// A file staged for addition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// File name relative to the working tree root.
    pub path: String,
    /// Blob holding the staged content.
    pub object_id: ObjectId,
    /// Content size in bytes.
    pub size: u64,
    pub flags: IndexFlags,
}

impl IndexEntry {
    pub fn new(path: impl Into<String>, object_id: ObjectId, size: u64) -> Self {
        Self {
            path: path.into(),
            object_id,
            size,
            flags: IndexFlags::default(),
        }
    }
}

/// Status flags for an index entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFlags {
    /// The staged content carries merge conflict markers.
    pub conflict: bool,
}
