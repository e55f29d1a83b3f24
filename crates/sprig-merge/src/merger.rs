//! Merging a named branch into the current branch.

use sprig_dag::{find_split_point, AncestorWalker, TraversalOrder};
use sprig_index::Index;
use sprig_refs::RefStore;
use sprig_store::{Commit, ObjectStore};
use sprig_types::ObjectId;
use sprig_worktree::{Checkout, Worktree};
use tracing::{debug, info};

use crate::engine::{MergeContext, MergeEngine};
use crate::error::{MergeError, MergeResult};

/// How a merge ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already part of the current history.
    AlreadyUpToDate,
    /// The current branch was moved forward to the given tip.
    FastForward { target: ObjectId },
    /// A merge commit was recorded. Conflicted files were committed with
    /// markers and are listed here.
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl MergeOutcome {
    /// The line to show the user, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyUpToDate => Some("Given branch is an ancestor of the current branch."),
            Self::FastForward { .. } => Some("Current branch fast-forwarded."),
            Self::Merged { conflicts, .. } if !conflicts.is_empty() => {
                Some("Encountered a merge conflict.")
            }
            Self::Merged { .. } => None,
        }
    }

    pub fn has_conflicts(&self) -> bool {
        matches!(self, Self::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

/// Merges branches over an object store and ref store.
pub struct Merger<'a> {
    store: &'a dyn ObjectStore,
    refs: &'a dyn RefStore,
    order: TraversalOrder,
}

impl<'a> Merger<'a> {
    pub fn new(store: &'a dyn ObjectStore, refs: &'a dyn RefStore) -> Self {
        Self {
            store,
            refs,
            order: TraversalOrder::default(),
        }
    }

    /// Frontier order used when looking for the split point.
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Merge `branch` into the current branch.
    ///
    /// Refusals are checked in this order, before anything is modified: the
    /// branch must exist, must not be the current branch, the staging area
    /// must be empty, and no untracked file may be in the way of the given
    /// tip. Then:
    ///
    /// - if the given tip is the split point, nothing happens;
    /// - if the current tip is the split point, the working tree and the
    ///   current branch move to the given tip;
    /// - otherwise the three-way merge is applied to `index` and `worktree`
    ///   and a two-parent commit is recorded, even when files conflict.
    ///
    /// The caller persists `index` afterwards.
    pub fn merge_branch(
        &self,
        index: &mut Index,
        worktree: &mut dyn Worktree,
        branch: &str,
    ) -> MergeResult<MergeOutcome> {
        let given = self
            .refs
            .read_branch(branch)?
            .ok_or_else(|| MergeError::BranchNotFound {
                name: branch.to_string(),
            })?;
        let current_branch = self.refs.current_branch()?;
        if current_branch == branch {
            return Err(MergeError::SelfMerge);
        }
        if !index.is_empty() {
            return Err(MergeError::UncommittedChanges);
        }
        let current = self.refs.resolve_branch(&current_branch)?;

        let checkout = Checkout::new(self.store);
        checkout.check_untracked(worktree, &current, index, &given)?;

        let walker = AncestorWalker::new(self.store).with_order(self.order);
        let split = find_split_point(&walker, &current, &given)?;

        if split.commit == given {
            debug!(branch, "given branch already merged");
            return Ok(MergeOutcome::AlreadyUpToDate);
        }
        if split.commit == current {
            checkout.checkout_commit(worktree, &current, &given)?;
            self.refs.write_branch(&current_branch, given)?;
            info!(
                branch = %current_branch,
                target = %given.short_hex(),
                "fast-forwarded"
            );
            return Ok(MergeOutcome::FastForward { target: given });
        }

        let report = {
            let mut ctx = MergeContext::new(index, worktree);
            MergeEngine::new(self.store).merge(&mut ctx, &split.commit, &current, &given)?
        };

        let base = self.store.get_commit(&current)?;
        let files = index.apply_to(&base.files);
        let message = format!("Merged {branch} into {current_branch}.");
        let commit = self
            .store
            .put_commit(&Commit::merge_of(current, given, message, files))?;
        index.clear();
        self.refs.write_branch(&current_branch, commit)?;

        info!(
            branch = %current_branch,
            given = branch,
            commit = %commit.short_hex(),
            conflicts = report.conflicts.len(),
            "recorded merge commit"
        );
        Ok(MergeOutcome::Merged {
            commit,
            conflicts: report.conflicts,
        })
    }
}
