use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sprig_index::{FileStatus, Index, StatusEntry, WorkdirStatus};
use sprig_merge::{MergeOutcome, Merger};
use sprig_refs::{FsRefStore, InMemoryRefStore, RefStore};
use sprig_store::{Blob, Commit, FsObjectStore, InMemoryObjectStore, ObjectStore, StoreError};
use sprig_types::ObjectId;
use sprig_worktree::{Checkout, DiskWorktree, InMemoryWorktree, Worktree, WorktreeError};
use tracing::{debug, info};

use crate::config::SprigConfig;
use crate::error::{SdkError, SdkResult};
use crate::summary::{LogEntry, RepoStatus};

/// Name of the metadata directory at the root of an on-disk repository.
pub const META_DIR: &str = ".sprig";

const CONFIG_FILE: &str = "config.toml";
const OBJECTS_DIR: &str = "objects";
const REFS_FILE: &str = "refs.json";
const INDEX_FILE: &str = "index";

/// A Sprig repository: objects, branches, staging area and working tree.
pub struct Repository {
    store: Arc<dyn ObjectStore>,
    refs: Box<dyn RefStore>,
    index: Index,
    worktree: Box<dyn Worktree>,
    config: SprigConfig,
    /// `None` for in-memory repositories.
    meta_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("meta_dir", &self.meta_dir)
            .field("config", &self.config)
            .field("index", &self.index)
            .finish()
    }
}

impl Repository {
    // ---- Construction ----

    /// Create a repository in `path`, with the root commit on the default
    /// branch. An existing `config.toml` in the metadata directory is
    /// honoured; otherwise the defaults are written.
    pub fn init(path: impl AsRef<Path>) -> SdkResult<Self> {
        let root = path.as_ref();
        let meta = root.join(META_DIR);
        if meta.join(REFS_FILE).exists() {
            return Err(SdkError::user(
                "A Sprig repository already exists in this directory.",
            ));
        }
        fs::create_dir_all(meta.join(OBJECTS_DIR))?;

        let config_path = meta.join(CONFIG_FILE);
        let config = SprigConfig::load(&config_path)?;
        if !config_path.exists() {
            config.save(&config_path)?;
        }

        let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::open(meta.join(OBJECTS_DIR))?);
        let refs = FsRefStore::open(meta.join(REFS_FILE))?;
        let worktree = DiskWorktree::open(root, META_DIR)?;
        let repo = Self::bootstrap(store, Box::new(refs), Box::new(worktree), config, Some(meta))?;
        info!(path = %root.display(), branch = %repo.config.default_branch, "initialized repository");
        Ok(repo)
    }

    /// Open the repository rooted at `path`.
    pub fn open(path: impl AsRef<Path>) -> SdkResult<Self> {
        let root = path.as_ref();
        let meta = root.join(META_DIR);
        if !meta.join(REFS_FILE).exists() {
            return Err(SdkError::NotInitialized(root.display().to_string()));
        }

        let config = SprigConfig::load(&meta.join(CONFIG_FILE))?;
        let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::open(meta.join(OBJECTS_DIR))?);
        let refs = FsRefStore::open(meta.join(REFS_FILE))?;
        let index = Index::load(&meta.join(INDEX_FILE), Arc::clone(&store))?;
        let worktree = DiskWorktree::open(root, META_DIR)?;
        debug!(path = %root.display(), "opened repository");

        Ok(Self {
            store,
            refs: Box::new(refs),
            index,
            worktree: Box::new(worktree),
            config,
            meta_dir: Some(meta),
        })
    }

    /// A repository held entirely in memory, with the default configuration.
    pub fn in_memory() -> SdkResult<Self> {
        Self::in_memory_with_config(SprigConfig::default())
    }

    pub fn in_memory_with_config(config: SprigConfig) -> SdkResult<Self> {
        Self::bootstrap(
            Arc::new(InMemoryObjectStore::new()),
            Box::new(InMemoryRefStore::new()),
            Box::new(InMemoryWorktree::new()),
            config,
            None,
        )
    }

    fn bootstrap(
        store: Arc<dyn ObjectStore>,
        refs: Box<dyn RefStore>,
        worktree: Box<dyn Worktree>,
        config: SprigConfig,
        meta_dir: Option<PathBuf>,
    ) -> SdkResult<Self> {
        let root = store.put_commit(&Commit::root())?;
        refs.write_branch(&config.default_branch, root)?;
        refs.set_head(&config.default_branch)?;
        let repo = Self {
            index: Index::new(Arc::clone(&store)),
            store,
            refs,
            worktree,
            config,
            meta_dir,
        };
        repo.persist()?;
        Ok(repo)
    }

    /// Write the staging area to disk. Refs and objects are written as
    /// they change; in-memory repositories have nothing to persist.
    fn persist(&self) -> SdkResult<()> {
        if let Some(meta) = &self.meta_dir {
            self.index.save(&meta.join(INDEX_FILE))?;
        }
        Ok(())
    }

    // ---- Accessors ----

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn config(&self) -> &SprigConfig {
        &self.config
    }

    pub fn worktree(&self) -> &dyn Worktree {
        self.worktree.as_ref()
    }

    pub fn worktree_mut(&mut self) -> &mut dyn Worktree {
        self.worktree.as_mut()
    }

    pub fn current_branch(&self) -> SdkResult<String> {
        Ok(self.refs.current_branch()?)
    }

    pub fn head_id(&self) -> SdkResult<ObjectId> {
        Ok(self.refs.head_commit()?)
    }

    pub fn head_commit(&self) -> SdkResult<Commit> {
        Ok(self.store.get_commit(&self.head_id()?)?)
    }

    pub fn branch_tip(&self, name: &str) -> SdkResult<Option<ObjectId>> {
        Ok(self.refs.read_branch(name)?)
    }

    // ---- Staging ----

    /// Stage the working copy of `name`. If it matches the head commit's
    /// version, any staged addition is dropped instead. A pending removal
    /// of `name` is cancelled either way.
    pub fn add(&mut self, name: &str) -> SdkResult<()> {
        let content = self
            .worktree
            .read_file(name)?
            .ok_or_else(|| SdkError::user("File does not exist."))?;
        let head = self.head_commit()?;

        self.index.unstage_removal(name);
        let id = Blob::new(name, content.as_slice()).id()?;
        if head.blob_for(name) == Some(&id) {
            self.index.unstage(name);
            debug!(file = name, "matches head, unstaged");
        } else {
            self.index.stage_file(name, &content)?;
        }
        self.persist()
    }

    /// Unstage `name`, and if the head commit tracks it, stage its removal
    /// and delete the working copy.
    pub fn rm(&mut self, name: &str) -> SdkResult<()> {
        let head = self.head_commit()?;
        let was_staged = self.index.unstage(name).is_some();
        let tracked = head.blob_for(name).is_some();
        if !was_staged && !tracked {
            return Err(SdkError::user("No reason to remove the file."));
        }
        if tracked {
            self.index.stage_removal(name)?;
            self.worktree.remove_file(name)?;
        }
        self.persist()
    }

    // ---- Commits ----

    /// Record the staging area as a new commit on the current branch.
    pub fn commit(&mut self, message: &str) -> SdkResult<ObjectId> {
        if message.is_empty() {
            return Err(SdkError::user("Please enter a commit message."));
        }
        if self.index.is_empty() {
            return Err(SdkError::user("No changes added to the commit."));
        }
        let branch = self.current_branch()?;
        let parent = self.head_id()?;
        let files = self.index.apply_to(&self.store.get_commit(&parent)?.files);

        let id = self
            .store
            .put_commit(&Commit::child_of(parent, message, files))?;
        self.refs.write_branch(&branch, id)?;
        self.index.clear();
        self.persist()?;
        info!(branch = %branch, commit = %id.short_hex(), "committed");
        Ok(id)
    }

    /// First-parent history from the head commit, newest first.
    pub fn log(&self) -> SdkResult<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(self.head_id()?);
        while let Some(id) = next {
            let commit = self.store.get_commit(&id)?;
            next = commit.parent;
            entries.push(LogEntry { id, commit });
        }
        Ok(entries)
    }

    // ---- Branches ----

    /// Create `name` pointing at the head commit.
    pub fn branch(&mut self, name: &str) -> SdkResult<()> {
        if self.refs.branch_exists(name)? {
            return Err(SdkError::user("A branch with that name already exists."));
        }
        let head = self.head_id()?;
        self.refs.write_branch(name, head)?;
        debug!(branch = name, target = %head.short_hex(), "created branch");
        Ok(())
    }

    /// Delete the branch pointer `name`. Its commits are kept.
    pub fn remove_branch(&mut self, name: &str) -> SdkResult<()> {
        if !self.refs.branch_exists(name)? {
            return Err(SdkError::user("A branch with that name does not exist."));
        }
        if self.current_branch()? == name {
            return Err(SdkError::user("Cannot remove the current branch."));
        }
        self.refs.delete_branch(name)?;
        Ok(())
    }

    /// Switch to `name`: rewrite the working tree to its tip, clear the
    /// staging area, and move HEAD.
    pub fn checkout(&mut self, name: &str) -> SdkResult<()> {
        let target = self
            .refs
            .read_branch(name)?
            .ok_or_else(|| SdkError::user("No such branch exists."))?;
        if self.current_branch()? == name {
            return Err(SdkError::user("No need to checkout the current branch."));
        }
        let head = self.head_id()?;

        let checkout = Checkout::new(self.store.as_ref());
        checkout.check_untracked(self.worktree.as_ref(), &head, &self.index, &target)?;
        checkout.checkout_commit(self.worktree.as_mut(), &head, &target)?;
        self.index.clear();
        self.refs.set_head(name)?;
        self.persist()?;
        info!(branch = name, commit = %target.short_hex(), "checked out branch");
        Ok(())
    }

    /// Overwrite `file` in the working tree with its version in `commit`.
    /// The staging area is not touched.
    pub fn checkout_file(&mut self, commit: &ObjectId, file: &str) -> SdkResult<()> {
        match self.store.get_commit(commit) {
            Ok(_) => {}
            Err(StoreError::NotFound(_) | StoreError::KindMismatch { .. }) => {
                return Err(SdkError::user("No commit with that id exists."));
            }
            Err(e) => return Err(e.into()),
        }
        let result =
            Checkout::new(self.store.as_ref()).checkout_file(self.worktree.as_mut(), commit, file);
        match result {
            Ok(_) => Ok(()),
            Err(WorktreeError::FileNotInCommit { .. }) => {
                Err(SdkError::user("File does not exist in that commit."))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a full or abbreviated commit id. A prefix must match
    /// exactly one commit; blobs sharing the prefix are ignored.
    pub fn resolve_commit(&self, prefix: &str) -> SdkResult<ObjectId> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SdkError::user("No commit with that id exists."));
        }
        let mut matches = Vec::new();
        for id in self.store.ids_with_prefix(&prefix)? {
            match self.store.get_commit(&id) {
                Ok(_) => matches.push(id),
                Err(StoreError::KindMismatch { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(SdkError::user("No commit with that id exists.")),
            _ => Err(SdkError::user("Commit id is ambiguous.")),
        }
    }

    // ---- Merge ----

    /// Merge `branch` into the current branch. See [`Merger::merge_branch`]
    /// for the refusal conditions and outcomes.
    pub fn merge(&mut self, branch: &str) -> SdkResult<MergeOutcome> {
        let outcome = Merger::new(self.store.as_ref(), self.refs.as_ref())
            .with_order(self.config.merge.traversal)
            .merge_branch(&mut self.index, self.worktree.as_mut(), branch)?;
        self.persist()?;
        Ok(outcome)
    }

    // ---- Status ----

    pub fn status(&self) -> SdkResult<RepoStatus> {
        let current_branch = self.current_branch()?;
        let branches = self
            .refs
            .list_branches()?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        let head_id = self.head_id()?;
        let head = self.store.get_commit(&head_id)?;

        let mut workdir = WorkdirStatus::new();
        for entry in self.index.additions() {
            let status = if head.blob_for(&entry.path).is_some() {
                FileStatus::Modified
            } else {
                FileStatus::New
            };
            workdir.staged.push(StatusEntry::new(entry.path.clone(), status));
        }
        workdir.removed = self.index.removals().map(str::to_string).collect();
        workdir.conflicts = self.index.conflict_paths();
        workdir.unstaged = self.unstaged_changes(&head)?;
        workdir.untracked = Checkout::new(self.store.as_ref()).untracked_files(
            self.worktree.as_ref(),
            &head_id,
            &self.index,
        )?;

        Ok(RepoStatus {
            current_branch,
            branches,
            workdir,
        })
    }

    /// Tracked or staged files whose working copy differs from what the
    /// next commit would record.
    fn unstaged_changes(&self, head: &Commit) -> SdkResult<Vec<StatusEntry>> {
        let mut expected = head.files.clone();
        for entry in self.index.additions() {
            expected.insert(entry.path.clone(), entry.object_id);
        }
        for name in self.index.removals() {
            expected.remove(name);
        }

        let mut changes = Vec::new();
        for (name, blob_id) in &expected {
            match self.worktree.read_file(name)? {
                None => changes.push(StatusEntry::new(name.clone(), FileStatus::Deleted)),
                Some(data) => {
                    if Blob::new(name.as_str(), data).id()? != *blob_id {
                        changes.push(StatusEntry::new(name.clone(), FileStatus::Modified));
                    }
                }
            }
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> Repository {
        Repository::in_memory().unwrap()
    }

    fn write(repo: &mut Repository, name: &str, content: &str) {
        repo.worktree_mut()
            .write_file(name, content.as_bytes())
            .unwrap();
    }

    fn user_message(err: SdkError) -> String {
        assert!(err.is_user_error(), "expected user error, got {err:?}");
        err.to_string()
    }

    #[test]
    fn in_memory_repo_starts_at_root_commit() {
        let repo = repo();
        assert_eq!(repo.current_branch().unwrap(), "main");
        let head = repo.head_commit().unwrap();
        assert_eq!(head, Commit::root());
        assert_eq!(repo.log().unwrap().len(), 1);
    }

    #[test]
    fn custom_default_branch() {
        let config = SprigConfig {
            default_branch: "trunk".to_string(),
            ..SprigConfig::default()
        };
        let repo = Repository::in_memory_with_config(config).unwrap();
        assert_eq!(repo.current_branch().unwrap(), "trunk");
    }

    #[test]
    fn add_missing_file_is_refused() {
        let mut repo = repo();
        assert_eq!(user_message(repo.add("nope").unwrap_err()), "File does not exist.");
    }

    #[test]
    fn add_commit_and_log() {
        let mut repo = repo();
        write(&mut repo, "f.txt", "hello");
        repo.add("f.txt").unwrap();
        let id = repo.commit("add f").unwrap();

        assert!(repo.index().is_empty());
        let log = repo.log().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].id, id);
        assert_eq!(log[0].commit.message, "add f");
        assert!(log[0].commit.blob_for("f.txt").is_some());
    }

    #[test]
    fn adding_unchanged_file_unstages_it() {
        let mut repo = repo();
        write(&mut repo, "f.txt", "v1");
        repo.add("f.txt").unwrap();
        repo.commit("v1").unwrap();

        write(&mut repo, "f.txt", "v2");
        repo.add("f.txt").unwrap();
        assert!(repo.index().get("f.txt").is_some());

        write(&mut repo, "f.txt", "v1");
        repo.add("f.txt").unwrap();
        assert!(repo.index().is_empty());
    }

    #[test]
    fn commit_refusals() {
        let mut repo = repo();
        assert_eq!(
            user_message(repo.commit("nothing").unwrap_err()),
            "No changes added to the commit."
        );
        write(&mut repo, "f.txt", "x");
        repo.add("f.txt").unwrap();
        assert_eq!(
            user_message(repo.commit("").unwrap_err()),
            "Please enter a commit message."
        );
        assert!(repo.commit("  ").is_ok());
    }

    #[test]
    fn rm_tracked_file_stages_removal() {
        let mut repo = repo();
        write(&mut repo, "f.txt", "x");
        repo.add("f.txt").unwrap();
        repo.commit("add").unwrap();

        repo.rm("f.txt").unwrap();
        assert!(repo.index().is_staged_for_removal("f.txt"));
        assert!(!repo.worktree().contains("f.txt").unwrap());

        repo.commit("remove").unwrap();
        assert!(repo.head_commit().unwrap().files.is_empty());
    }

    #[test]
    fn rm_staged_only_file_unstages_and_keeps_it() {
        let mut repo = repo();
        write(&mut repo, "new.txt", "x");
        repo.add("new.txt").unwrap();
        repo.rm("new.txt").unwrap();
        assert!(repo.index().is_empty());
        assert!(repo.worktree().contains("new.txt").unwrap());

        assert_eq!(
            user_message(repo.rm("new.txt").unwrap_err()),
            "No reason to remove the file."
        );
    }

    #[test]
    fn branch_and_checkout() {
        let mut repo = repo();
        write(&mut repo, "shared.txt", "base");
        repo.add("shared.txt").unwrap();
        repo.commit("base").unwrap();
        repo.branch("side").unwrap();
        assert_eq!(
            user_message(repo.branch("side").unwrap_err()),
            "A branch with that name already exists."
        );

        write(&mut repo, "main-only.txt", "m");
        repo.add("main-only.txt").unwrap();
        repo.commit("main work").unwrap();

        repo.checkout("side").unwrap();
        assert_eq!(repo.current_branch().unwrap(), "side");
        assert!(!repo.worktree().contains("main-only.txt").unwrap());
        assert!(repo.worktree().contains("shared.txt").unwrap());

        assert_eq!(
            user_message(repo.checkout("side").unwrap_err()),
            "No need to checkout the current branch."
        );
        assert_eq!(
            user_message(repo.checkout("ghost").unwrap_err()),
            "No such branch exists."
        );
    }

    #[test]
    fn checkout_refuses_to_clobber_untracked_file() {
        let mut repo = repo();
        repo.branch("side").unwrap();
        write(&mut repo, "f.txt", "main");
        repo.add("f.txt").unwrap();
        repo.commit("main f").unwrap();
        repo.checkout("side").unwrap();

        write(&mut repo, "f.txt", "scratch");
        let err = repo.checkout("main").unwrap_err();
        assert!(user_message(err).starts_with("There is an untracked file in the way"));
        assert_eq!(repo.current_branch().unwrap(), "side");
    }

    #[test]
    fn checkout_file_restores_committed_version() {
        let mut repo = repo();
        write(&mut repo, "f.txt", "v1");
        repo.add("f.txt").unwrap();
        let c1 = repo.commit("v1").unwrap();
        write(&mut repo, "f.txt", "edited");

        repo.checkout_file(&c1, "f.txt").unwrap();
        assert_eq!(repo.worktree().read_file("f.txt").unwrap().unwrap(), b"v1");
        assert_eq!(
            user_message(repo.checkout_file(&c1, "other.txt").unwrap_err()),
            "File does not exist in that commit."
        );

        let blob_id = *repo.head_commit().unwrap().blob_for("f.txt").unwrap();
        let ghost = ObjectId::from_bytes(b"ghost");
        for bad in [blob_id, ghost] {
            assert_eq!(
                user_message(repo.checkout_file(&bad, "f.txt").unwrap_err()),
                "No commit with that id exists."
            );
        }
    }

    #[test]
    fn resolve_commit_accepts_short_ids() {
        let mut repo = repo();
        write(&mut repo, "f.txt", "v1");
        repo.add("f.txt").unwrap();
        let c1 = repo.commit("v1").unwrap();

        assert_eq!(repo.resolve_commit(&c1.short_hex()).unwrap(), c1);
        assert_eq!(repo.resolve_commit(&c1.to_hex()).unwrap(), c1);
        assert_eq!(
            repo.resolve_commit(&c1.short_hex().to_uppercase()).unwrap(),
            c1
        );

        let blob_id = *repo.head_commit().unwrap().blob_for("f.txt").unwrap();
        for bad in [blob_id.short_hex(), "".to_string(), "zz".to_string()] {
            assert_eq!(
                user_message(repo.resolve_commit(&bad).unwrap_err()),
                "No commit with that id exists."
            );
        }
    }

    #[test]
    fn resolve_commit_rejects_ambiguous_prefix() {
        let mut repo = repo();
        // Seventeen commits with sixteen possible leading digits.
        let mut ids = vec![repo.head_id().unwrap()];
        for i in 0..16 {
            write(&mut repo, "f.txt", &i.to_string());
            repo.add("f.txt").unwrap();
            ids.push(repo.commit(&format!("c{i}")).unwrap());
        }
        let shared = ids
            .iter()
            .map(|id| id.to_hex()[..1].to_string())
            .find(|digit| ids.iter().filter(|id| id.to_hex().starts_with(digit)).count() > 1)
            .unwrap();
        assert_eq!(
            user_message(repo.resolve_commit(&shared).unwrap_err()),
            "Commit id is ambiguous."
        );
    }

    #[test]
    fn remove_branch_rules() {
        let mut repo = repo();
        repo.branch("old").unwrap();
        assert_eq!(
            user_message(repo.remove_branch("main").unwrap_err()),
            "Cannot remove the current branch."
        );
        repo.remove_branch("old").unwrap();
        assert!(repo.branch_tip("old").unwrap().is_none());
        assert_eq!(
            user_message(repo.remove_branch("old").unwrap_err()),
            "A branch with that name does not exist."
        );
    }

    #[test]
    fn status_reports_every_category() {
        let mut repo = repo();
        write(&mut repo, "tracked.txt", "t");
        write(&mut repo, "doomed.txt", "d");
        write(&mut repo, "edited.txt", "e1");
        repo.add("tracked.txt").unwrap();
        repo.add("doomed.txt").unwrap();
        repo.add("edited.txt").unwrap();
        repo.commit("base").unwrap();
        repo.branch("side").unwrap();

        write(&mut repo, "new.txt", "n");
        repo.add("new.txt").unwrap();
        repo.rm("doomed.txt").unwrap();
        write(&mut repo, "edited.txt", "e2");
        write(&mut repo, "loose.txt", "l");

        let status = repo.status().unwrap();
        assert_eq!(status.current_branch, "main");
        assert_eq!(status.branches, vec!["main", "side"]);
        assert_eq!(
            status.workdir.staged,
            vec![StatusEntry::new("new.txt", FileStatus::New)]
        );
        assert_eq!(status.workdir.removed, vec!["doomed.txt"]);
        assert_eq!(
            status.workdir.unstaged,
            vec![StatusEntry::new("edited.txt", FileStatus::Modified)]
        );
        assert_eq!(status.workdir.untracked, vec!["loose.txt"]);
    }

    #[test]
    fn fresh_repo_status_is_clean() {
        let status = repo().status().unwrap();
        assert_eq!(status.workdir, WorkdirStatus::new());
    }
}
