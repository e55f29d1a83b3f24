//! The [`RefStore`] trait defining the reference storage interface.

use sprig_types::ObjectId;

use crate::error::{RefError, Result};

/// Storage backend for branches and HEAD.
///
/// Branch names are short names (`"main"`, `"feature/x"`); implementations
/// validate them on write.
pub trait RefStore: Send + Sync {
    /// Commit id the branch points at, or `None` if it does not exist.
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>>;

    /// Create or move a branch.
    fn write_branch(&self, name: &str, target: ObjectId) -> Result<()>;

    /// Delete a branch. Returns `Ok(false)` if it did not exist.
    fn delete_branch(&self, name: &str) -> Result<bool>;

    /// All branches, sorted by name.
    fn list_branches(&self) -> Result<Vec<(String, ObjectId)>>;

    /// Name of the checked-out branch, or `None` before initialization.
    fn head(&self) -> Result<Option<String>>;

    /// Point HEAD at a branch.
    fn set_head(&self, branch: &str) -> Result<()>;

    fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.read_branch(name)?.is_some())
    }

    /// Like [`read_branch`](Self::read_branch) but a missing branch is an error.
    fn resolve_branch(&self, name: &str) -> Result<ObjectId> {
        self.read_branch(name)?.ok_or_else(|| RefError::NotFound {
            name: name.to_string(),
        })
    }

    fn current_branch(&self) -> Result<String> {
        self.head()?.ok_or(RefError::HeadUnset)
    }

    /// Commit id at the tip of the checked-out branch.
    fn head_commit(&self) -> Result<ObjectId> {
        self.resolve_branch(&self.current_branch()?)
    }
}
