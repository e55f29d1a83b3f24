use sprig_index::WorkdirStatus;
use sprig_store::Commit;
use sprig_types::ObjectId;

/// One commit in the history shown by `log`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub id: ObjectId,
    pub commit: Commit,
}

impl LogEntry {
    /// Short ids of both parents, for merge commits.
    pub fn merge_parents(&self) -> Option<(String, String)> {
        match (self.commit.parent, self.commit.second_parent) {
            (Some(first), Some(second)) => Some((first.short_hex(), second.short_hex())),
            _ => None,
        }
    }
}

/// Snapshot of the repository for `status`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoStatus {
    pub current_branch: String,
    /// All branch names, sorted.
    pub branches: Vec<String>,
    pub workdir: WorkdirStatus,
}
