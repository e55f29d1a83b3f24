//! Filesystem-backed object store.
//!
//! Each object lives in its own file named by the full hex id:
//!
//! ```text
//! <root>/<hex id>    bincode-encoded StoredObject
//! ```
//!
//! Writes go through a temp file in the same directory followed by a rename,
//! so a reader never observes a half-written object.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use sprig_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::StoredObject;
use crate::traits::ObjectStore;

#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        let bytes = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let object: StoredObject =
            bincode::deserialize(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let computed = object.compute_id();
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(Some(object))
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        let path = self.object_path(&id);
        if path.exists() {
            return Ok(id);
        }

        let bytes =
            bincode::serialize(object).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(&bytes)?;
        tmp.persist(&path).map_err(io::Error::from)?;

        debug!(object = %id.short_hex(), kind = %object.kind, len = bytes.len(), "wrote object");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }

    fn ids_with_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            // Leftover temp files do not parse as ids.
            if let Ok(id) = name.parse::<ObjectId>() {
                if name.starts_with(prefix) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
