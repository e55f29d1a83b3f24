use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sprig_crypto::ContentHasher;
use sprig_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// File name to blob id. A commit's table is the complete tracked snapshot.
pub type FileTable = BTreeMap<String, ObjectId>;

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Blob,
    Commit,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

/// A stored object: kind tag + serialized data.
///
/// `StoredObject` is the unit of storage. The store never interprets `data`;
/// typed access goes through [`Blob`] and [`Commit`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub kind: ObjectKind,
    pub data: Vec<u8>,
}

impl StoredObject {
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Compute the content-addressed ID using the kind's hash domain.
    pub fn compute_id(&self) -> ObjectId {
        let hasher = match self.kind {
            ObjectKind::Blob => ContentHasher::BLOB,
            ObjectKind::Commit => ContentHasher::COMMIT,
        };
        hasher.hash(&self.data)
    }

    fn expect_kind(&self, expected: ObjectKind) -> StoreResult<()> {
        if self.kind != expected {
            return Err(StoreError::KindMismatch {
                id: self.compute_id(),
                expected,
                actual: self.kind,
            });
        }
        Ok(())
    }
}

fn encode<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<'a, T: Deserialize<'a>>(data: &'a [u8]) -> StoreResult<T> {
    bincode::deserialize(data).map_err(|e| StoreError::Serialization(e.to_string()))
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Immutable file snapshot.
///
/// The originating file name is part of the hashed payload, so the same bytes
/// staged under two names produce two blobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub name: String,
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Content as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        Ok(StoredObject::new(ObjectKind::Blob, encode(self)?))
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.expect_kind(ObjectKind::Blob)?;
        decode(&obj.data)
    }

    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(self.to_stored_object()?.compute_id())
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Immutable node in the commit graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// First parent. `None` only for the root commit.
    pub parent: Option<ObjectId>,
    /// Set only on merge commits: the tip of the branch that was merged in.
    pub second_parent: Option<ObjectId>,
    pub files: FileTable,
}

impl Commit {
    /// The root commit every repository starts from.
    pub fn root() -> Self {
        Self {
            message: "initial commit".to_string(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            parent: None,
            second_parent: None,
            files: FileTable::new(),
        }
    }

    /// A regular single-parent commit stamped with the current time.
    pub fn child_of(parent: ObjectId, message: impl Into<String>, files: FileTable) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            parent: Some(parent),
            second_parent: None,
            files,
        }
    }

    /// A two-parent merge commit stamped with the current time.
    pub fn merge_of(
        current: ObjectId,
        given: ObjectId,
        message: impl Into<String>,
        files: FileTable,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            parent: Some(current),
            second_parent: Some(given),
            files,
        }
    }

    /// Parent ids in traversal order: first parent, then second parent.
    pub fn parents(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.parent.iter().chain(self.second_parent.iter()).copied()
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn blob_for(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        Ok(StoredObject::new(ObjectKind::Commit, encode(self)?))
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.expect_kind(ObjectKind::Commit)?;
        decode(&obj.data)
    }

    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(self.to_stored_object()?.compute_id())
    }
}
