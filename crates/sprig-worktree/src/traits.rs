use crate::error::WorktreeResult;

/// A flat working directory of named files.
pub trait Worktree {
    /// Content of `name`, or `None` if the file does not exist.
    fn read_file(&self, name: &str) -> WorktreeResult<Option<Vec<u8>>>;

    /// Create or overwrite `name`.
    fn write_file(&mut self, name: &str, data: &[u8]) -> WorktreeResult<()>;

    /// Delete `name`. Returns `false` if it did not exist.
    fn remove_file(&mut self, name: &str) -> WorktreeResult<bool>;

    /// All file names, sorted.
    fn list_files(&self) -> WorktreeResult<Vec<String>>;

    fn contains(&self, name: &str) -> WorktreeResult<bool> {
        Ok(self.read_file(name)?.is_some())
    }
}
