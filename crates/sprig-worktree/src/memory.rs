use std::collections::BTreeMap;

use crate::error::WorktreeResult;
use crate::traits::Worktree;

/// Map-backed [`Worktree`] for tests and embedding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryWorktree {
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemoryWorktree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of `name` as text, for assertions.
    pub fn text(&self, name: &str) -> Option<String> {
        self.files
            .get(name)
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

impl Worktree for InMemoryWorktree {
    fn read_file(&self, name: &str) -> WorktreeResult<Option<Vec<u8>>> {
        Ok(self.files.get(name).cloned())
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> WorktreeResult<()> {
        self.files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn remove_file(&mut self, name: &str) -> WorktreeResult<bool> {
        Ok(self.files.remove(name).is_some())
    }

    fn list_files(&self) -> WorktreeResult<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }
}
