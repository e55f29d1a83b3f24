//! JSON-file backed reference store.
//!
//! All branches and HEAD live in a single document, rewritten atomically on
//! every mutation:
//!
//! ```json
//! { "head": "main", "branches": { "main": [..32 bytes..] } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use sprig_types::ObjectId;
use tracing::debug;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::traits::RefStore;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct RefsDocument {
    head: Option<String>,
    branches: BTreeMap<String, ObjectId>,
}

/// [`RefStore`] persisted to a JSON file.
#[derive(Debug)]
pub struct FsRefStore {
    path: PathBuf,
    doc: RwLock<RefsDocument>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> RefError {
    RefError::Serialization(format!("lock poisoned: {e}"))
}

impl FsRefStore {
    /// Open the ref file at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RefError::Serialization(e.to_string()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => RefsDocument::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            doc: RwLock::new(doc),
        })
    }

    fn update<T>(&self, f: impl FnOnce(&mut RefsDocument) -> Result<T>) -> Result<T> {
        let mut doc = self.doc.write().map_err(poisoned)?;
        let mut next = doc.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *doc = next;
        Ok(out)
    }

    fn persist(&self, doc: &RefsDocument) -> Result<()> {
        let json = serde_json::to_vec_pretty(doc)
            .map_err(|e| RefError::Serialization(e.to_string()))?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&self.path).map_err(io::Error::from)?;
        Ok(())
    }
}

impl RefStore for FsRefStore {
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        Ok(self.doc.read().map_err(poisoned)?.branches.get(name).copied())
    }

    fn write_branch(&self, name: &str, target: ObjectId) -> Result<()> {
        validate_branch_name(name)?;
        self.update(|doc| {
            doc.branches.insert(name.to_string(), target);
            Ok(())
        })?;
        debug!(branch = name, target = %target.short_hex(), "branch updated");
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<bool> {
        self.update(|doc| {
            if doc.head.as_deref() == Some(name) {
                return Err(RefError::DeleteCurrentBranch {
                    name: name.to_string(),
                });
            }
            Ok(doc.branches.remove(name).is_some())
        })
    }

    fn list_branches(&self) -> Result<Vec<(String, ObjectId)>> {
        let doc = self.doc.read().map_err(poisoned)?;
        Ok(doc.branches.iter().map(|(k, v)| (k.clone(), *v)).collect())
    }

    fn head(&self) -> Result<Option<String>> {
        Ok(self.doc.read().map_err(poisoned)?.head.clone())
    }

    fn set_head(&self, branch: &str) -> Result<()> {
        validate_branch_name(branch)?;
        self.update(|doc| {
            doc.head = Some(branch.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.json");
        let target = ObjectId::from_bytes(b"tip");

        let store = FsRefStore::open(&path).unwrap();
        store.write_branch("main", target).unwrap();
        store.set_head("main").unwrap();
        drop(store);

        let reopened = FsRefStore::open(&path).unwrap();
        assert_eq!(reopened.current_branch().unwrap(), "main");
        assert_eq!(reopened.head_commit().unwrap(), target);
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRefStore::open(dir.path().join("refs.json")).unwrap();
        assert!(store.list_branches().unwrap().is_empty());
        assert!(store.head().unwrap().is_none());
    }

    #[test]
    fn failed_update_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.json");
        let store = FsRefStore::open(&path).unwrap();
        store.write_branch("main", ObjectId::from_bytes(b"a")).unwrap();
        store.set_head("main").unwrap();

        assert!(store.delete_branch("main").is_err());
        let reopened = FsRefStore::open(&path).unwrap();
        assert!(reopened.branch_exists("main").unwrap());
    }

    #[test]
    fn corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.json");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            FsRefStore::open(&path),
            Err(RefError::Serialization(_))
        ));
    }
}
