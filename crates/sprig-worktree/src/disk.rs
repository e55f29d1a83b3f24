use std::fs;
use std::io;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::{WorktreeError, WorktreeResult};
use crate::traits::Worktree;

/// A real directory. Only regular files directly under the root are part of
/// the working tree; subdirectories and the repository metadata directory
/// are ignored.
#[derive(Clone, Debug)]
pub struct DiskWorktree {
    root: PathBuf,
    meta_dir: String,
}

impl DiskWorktree {
    /// `meta_dir` is the name of the repository metadata directory under
    /// `root` (e.g. `.sprig`); it is never listed or written through.
    pub fn open(root: impl Into<PathBuf>, meta_dir: impl Into<String>) -> WorktreeResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(WorktreeError::NotADirectory(root));
        }
        Ok(Self {
            root,
            meta_dir: meta_dir.into(),
        })
    }

    fn path_of(&self, name: &str) -> WorktreeResult<PathBuf> {
        let flat = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && name != self.meta_dir;
        if !flat {
            return Err(WorktreeError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl Worktree for DiskWorktree {
    fn read_file(&self, name: &str) -> WorktreeResult<Option<Vec<u8>>> {
        match fs::read(self.path_of(name)?) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> WorktreeResult<()> {
        fs::write(self.path_of(name)?, data)?;
        Ok(())
    }

    fn remove_file(&mut self, name: &str) -> WorktreeResult<bool> {
        match fs::remove_file(self.path_of(name)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_files(&self) -> WorktreeResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
