//! The [`Index`] structure managing staged changes.
//!
//! Additions are kept in a `BTreeMap<String, IndexEntry>`, removals in a
//! `BTreeSet<String>`; a name is never in both. Filesystem access to working
//! files is the caller's job; the index only writes blobs to the store.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sprig_store::{Blob, FileTable, ObjectStore};
use sprig_types::ObjectId;
use tracing::debug;

use crate::entry::{IndexEntry, IndexFlags};
use crate::error::{IndexError, IndexResult};

const INDEX_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    additions: BTreeMap<String, IndexEntry>,
    removals: BTreeSet<String>,
}

/// The staging area: changes queued for the next commit.
pub struct Index {
    additions: BTreeMap<String, IndexEntry>,
    removals: BTreeSet<String>,
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("additions", &self.additions.len())
            .field("removals", &self.removals.len())
            .finish()
    }
}

fn check_path(path: &str) -> IndexResult<()> {
    if path.is_empty() {
        return Err(IndexError::InvalidPath("empty path".to_string()));
    }
    Ok(())
}

impl Index {
    /// Create an empty index backed by the given store.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            store,
        }
    }

    /// Load a persisted index. A missing file yields an empty index.
    pub fn load(path: &Path, store: Arc<dyn ObjectStore>) -> IndexResult<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new(store)),
            Err(e) => return Err(e.into()),
        };
        let persisted: PersistedIndex = bincode::deserialize(&bytes)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;
        if persisted.version != INDEX_VERSION {
            return Err(IndexError::Serialization(format!(
                "unsupported index version {}",
                persisted.version
            )));
        }
        Ok(Self {
            additions: persisted.additions,
            removals: persisted.removals,
            store,
        })
    }

    /// Atomically write the index to `path`.
    pub fn save(&self, path: &Path) -> IndexResult<()> {
        let persisted = PersistedIndex {
            version: INDEX_VERSION,
            additions: self.additions.clone(),
            removals: self.removals.clone(),
        };
        let bytes = bincode::serialize(&persisted)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(path).map_err(io::Error::from)?;
        Ok(())
    }

    /// Returns `true` if nothing is staged for addition or removal.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.additions.get(path)
    }

    pub fn additions(&self) -> impl Iterator<Item = &IndexEntry> {
        self.additions.values()
    }

    pub fn removals(&self) -> impl Iterator<Item = &str> {
        self.removals.iter().map(String::as_str)
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removals.contains(path)
    }

    // ---------------------------------------------------------------
    // Stage operations
    // ---------------------------------------------------------------

    /// Store `content` as a blob named `path` and stage it.
    pub fn stage_file(&mut self, path: &str, content: &[u8]) -> IndexResult<ObjectId> {
        check_path(path)?;
        let object_id = self.store.put_blob(&Blob::new(path, content))?;
        self.insert(IndexEntry::new(path, object_id, content.len() as u64));
        Ok(object_id)
    }

    /// Stage a blob that is already in the store.
    pub fn stage_object(&mut self, path: &str, object_id: ObjectId, size: u64) -> IndexResult<()> {
        check_path(path)?;
        self.insert(IndexEntry::new(path, object_id, size));
        Ok(())
    }

    /// Store conflict-marked content for `path` and stage it flagged as a
    /// conflict.
    pub fn stage_conflict(&mut self, path: &str, content: &[u8]) -> IndexResult<ObjectId> {
        check_path(path)?;
        let object_id = self.store.put_blob(&Blob::new(path, content))?;
        let mut entry = IndexEntry::new(path, object_id, content.len() as u64);
        entry.flags = IndexFlags { conflict: true };
        self.insert(entry);
        Ok(object_id)
    }

    fn insert(&mut self, entry: IndexEntry) {
        debug!(path = %entry.path, blob = %entry.object_id.short_hex(), conflict = entry.flags.conflict, "staged");
        self.removals.remove(&entry.path);
        self.additions.insert(entry.path.clone(), entry);
    }

    /// Drop a staged addition. Returns the entry if there was one.
    pub fn unstage(&mut self, path: &str) -> Option<IndexEntry> {
        self.additions.remove(path)
    }

    /// Queue `path` for removal, dropping any staged addition for it.
    pub fn stage_removal(&mut self, path: &str) -> IndexResult<()> {
        check_path(path)?;
        self.additions.remove(path);
        self.removals.insert(path.to_string());
        debug!(path, "staged removal");
        Ok(())
    }

    /// Cancel a staged removal.
    pub fn unstage_removal(&mut self, path: &str) -> bool {
        self.removals.remove(path)
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    // ---------------------------------------------------------------
    // Conflicts
    // ---------------------------------------------------------------

    pub fn conflict_paths(&self) -> Vec<String> {
        self.additions
            .values()
            .filter(|e| e.flags.conflict)
            .map(|e| e.path.clone())
            .collect()
    }

    // ---------------------------------------------------------------
    // Commit support
    // ---------------------------------------------------------------

    /// File table of the next commit: `base` with staged additions applied
    /// and staged removals dropped.
    pub fn apply_to(&self, base: &FileTable) -> FileTable {
        let mut table = base.clone();
        for entry in self.additions.values() {
            table.insert(entry.path.clone(), entry.object_id);
        }
        for path in &self.removals {
            table.remove(path);
        }
        table
    }
}
