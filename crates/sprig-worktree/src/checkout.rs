//! Materializing committed files into a working tree.

use sprig_index::Index;
use sprig_store::{Blob, ObjectStore};
use sprig_types::ObjectId;
use tracing::debug;

use crate::error::{WorktreeError, WorktreeResult};
use crate::traits::Worktree;

/// Writes committed file versions into a [`Worktree`].
pub struct Checkout<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> Checkout<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Overwrite `name` in the working tree with its version in `commit`.
    /// Returns the blob that was written.
    pub fn checkout_file(
        &self,
        worktree: &mut dyn Worktree,
        commit: &ObjectId,
        name: &str,
    ) -> WorktreeResult<Blob> {
        let commit = self.store.get_commit(commit)?;
        let blob_id = commit
            .blob_for(name)
            .ok_or_else(|| WorktreeError::FileNotInCommit {
                path: name.to_string(),
            })?;
        let blob = self.store.get_blob(blob_id)?;
        worktree.write_file(name, &blob.data)?;
        debug!(file = name, blob = %blob_id.short_hex(), "checked out file");
        Ok(blob)
    }

    /// Replace the tracked contents of the working tree: every file in `to`
    /// is written, and files tracked by `from` but not by `to` are deleted.
    /// Untracked files are left alone.
    pub fn checkout_commit(
        &self,
        worktree: &mut dyn Worktree,
        from: &ObjectId,
        to: &ObjectId,
    ) -> WorktreeResult<()> {
        let old = self.store.get_commit(from)?;
        let new = self.store.get_commit(to)?;

        for (name, blob_id) in &new.files {
            let blob = self.store.get_blob(blob_id)?;
            worktree.write_file(name, &blob.data)?;
        }
        for name in old.files.keys() {
            if !new.files.contains_key(name) {
                worktree.remove_file(name)?;
            }
        }
        debug!(
            from = %from.short_hex(),
            to = %to.short_hex(),
            files = new.files.len(),
            "checked out commit"
        );
        Ok(())
    }

    /// Working files that are neither tracked by `head` nor staged.
    pub fn untracked_files(
        &self,
        worktree: &dyn Worktree,
        head: &ObjectId,
        index: &Index,
    ) -> WorktreeResult<Vec<String>> {
        let head = self.store.get_commit(head)?;
        Ok(worktree
            .list_files()?
            .into_iter()
            .filter(|name| !head.files.contains_key(name) && index.get(name).is_none())
            .collect())
    }

    /// Fail if moving the working tree to `target` would overwrite an
    /// untracked file.
    pub fn check_untracked(
        &self,
        worktree: &dyn Worktree,
        head: &ObjectId,
        index: &Index,
        target: &ObjectId,
    ) -> WorktreeResult<()> {
        let target = self.store.get_commit(target)?;
        for name in self.untracked_files(worktree, head, index)? {
            if target.files.contains_key(&name) {
                return Err(WorktreeError::UntrackedFileInWay { path: name });
            }
        }
        Ok(())
    }
}
