//! Applying merge decisions to the staging area and working tree.

use std::collections::BTreeSet;

use sprig_index::Index;
use sprig_store::ObjectStore;
use sprig_types::ObjectId;
use sprig_worktree::{Checkout, Worktree};
use tracing::{debug, info};

use crate::classify::{classify, MergeAction};
use crate::conflict::render_conflict;
use crate::error::MergeResult;

/// The mutable state a merge writes into.
pub struct MergeContext<'a> {
    pub index: &'a mut Index,
    pub worktree: &'a mut dyn Worktree,
}

impl<'a> MergeContext<'a> {
    pub fn new(index: &'a mut Index, worktree: &'a mut dyn Worktree) -> Self {
        Self { index, worktree }
    }
}

/// What a three-way merge did, file by file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Every file whose action was not [`MergeAction::Keep`], by name.
    pub actions: Vec<(String, MergeAction)>,
    /// Files now holding conflict markers, by name.
    pub conflicts: Vec<String>,
}

/// Three-way merge of file tables.
pub struct MergeEngine<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> MergeEngine<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Merge `given` into `current` against their split point.
    ///
    /// Every file in any of the three commits is classified and the result
    /// applied to `ctx`. Files are visited in name order, and all of them
    /// are processed even after a conflict. No commit is created here.
    pub fn merge(
        &self,
        ctx: &mut MergeContext<'_>,
        split: &ObjectId,
        current: &ObjectId,
        given: &ObjectId,
    ) -> MergeResult<MergeReport> {
        let split_commit = self.store.get_commit(split)?;
        let current_commit = self.store.get_commit(current)?;
        let given_commit = self.store.get_commit(given)?;

        let names: BTreeSet<&String> = split_commit
            .files
            .keys()
            .chain(current_commit.files.keys())
            .chain(given_commit.files.keys())
            .collect();

        let mut report = MergeReport::default();
        for name in names {
            let action = classify(
                split_commit.blob_for(name).copied(),
                current_commit.blob_for(name).copied(),
                given_commit.blob_for(name).copied(),
            );
            if action == MergeAction::Keep {
                continue;
            }
            self.apply(ctx, name, action, given)?;
            if action.is_conflict() {
                report.conflicts.push(name.clone());
            }
            report.actions.push((name.clone(), action));
        }

        info!(
            current = %current.short_hex(),
            given = %given.short_hex(),
            split = %split.short_hex(),
            changed = report.actions.len(),
            conflicts = report.conflicts.len(),
            "three-way merge applied"
        );
        Ok(report)
    }

    fn apply(
        &self,
        ctx: &mut MergeContext<'_>,
        name: &str,
        action: MergeAction,
        given: &ObjectId,
    ) -> MergeResult<()> {
        match action {
            MergeAction::Keep => {}
            MergeAction::Remove => {
                ctx.worktree.remove_file(name)?;
                ctx.index.stage_removal(name)?;
                debug!(file = name, "removed by merge");
            }
            MergeAction::TakeGiven(blob_id) => {
                let blob = Checkout::new(self.store).checkout_file(ctx.worktree, given, name)?;
                ctx.index
                    .stage_object(name, blob_id, blob.data.len() as u64)?;
                debug!(file = name, blob = %blob_id.short_hex(), "took given version");
            }
            MergeAction::Conflict { current, given } => {
                self.write_conflict(ctx, name, current, given)?;
            }
        }
        Ok(())
    }

    /// Write conflict markers for `name` into the working tree and stage
    /// them. A `None` side is treated as empty content.
    pub fn write_conflict(
        &self,
        ctx: &mut MergeContext<'_>,
        name: &str,
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    ) -> MergeResult<ObjectId> {
        let current_blob = current.map(|id| self.store.get_blob(&id)).transpose()?;
        let given_blob = given.map(|id| self.store.get_blob(&id)).transpose()?;
        let text = render_conflict(
            current_blob.as_ref().map(|b| b.data.as_slice()),
            given_blob.as_ref().map(|b| b.data.as_slice()),
        );

        ctx.worktree.write_file(name, text.as_bytes())?;
        let id = ctx.index.stage_conflict(name, text.as_bytes())?;
        debug!(file = name, blob = %id.short_hex(), "wrote conflict markers");
        Ok(id)
    }
}
