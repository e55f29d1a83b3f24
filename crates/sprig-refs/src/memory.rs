//! In-memory reference store for testing and ephemeral use.

use std::collections::BTreeMap;
use std::sync::RwLock;

use sprig_types::ObjectId;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::traits::RefStore;

/// An in-memory implementation of [`RefStore`]. Data is lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    branches: RwLock<BTreeMap<String, ObjectId>>,
    head: RwLock<Option<String>>,
}

impl InMemoryRefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> RefError {
    RefError::Serialization(format!("lock poisoned: {e}"))
}

impl RefStore for InMemoryRefStore {
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        let branches = self.branches.read().map_err(poisoned)?;
        Ok(branches.get(name).copied())
    }

    fn write_branch(&self, name: &str, target: ObjectId) -> Result<()> {
        validate_branch_name(name)?;
        let mut branches = self.branches.write().map_err(poisoned)?;
        branches.insert(name.to_string(), target);
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<bool> {
        if self.head.read().map_err(poisoned)?.as_deref() == Some(name) {
            return Err(RefError::DeleteCurrentBranch {
                name: name.to_string(),
            });
        }
        let mut branches = self.branches.write().map_err(poisoned)?;
        Ok(branches.remove(name).is_some())
    }

    fn list_branches(&self) -> Result<Vec<(String, ObjectId)>> {
        let branches = self.branches.read().map_err(poisoned)?;
        Ok(branches.iter().map(|(k, v)| (k.clone(), *v)).collect())
    }

    fn head(&self) -> Result<Option<String>> {
        Ok(self.head.read().map_err(poisoned)?.clone())
    }

    fn set_head(&self, branch: &str) -> Result<()> {
        validate_branch_name(branch)?;
        *self.head.write().map_err(poisoned)? = Some(branch.to_string());
        Ok(())
    }
}
