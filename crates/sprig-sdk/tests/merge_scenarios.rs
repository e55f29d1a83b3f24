use sprig_sdk::{MergeOutcome, Repository, SdkError, SprigConfig, TraversalOrder};

fn write(repo: &mut Repository, name: &str, content: &str) {
    repo.worktree_mut()
        .write_file(name, content.as_bytes())
        .unwrap();
}

fn read(repo: &Repository, name: &str) -> Option<String> {
    repo.worktree()
        .read_file(name)
        .unwrap()
        .map(|data| String::from_utf8(data).unwrap())
}

fn commit_files(repo: &mut Repository, message: &str, files: &[(&str, &str)]) {
    for (name, content) in files {
        write(repo, name, content);
        repo.add(name).unwrap();
    }
    repo.commit(message).unwrap();
}

/// `main` and `other` share a base commit with `f = "A"`.
fn forked(config: SprigConfig) -> Repository {
    let mut repo = Repository::in_memory_with_config(config).unwrap();
    commit_files(&mut repo, "base", &[("f", "A")]);
    repo.branch("other").unwrap();
    repo
}

fn staged_or_committed(repo: &Repository, name: &str) -> String {
    let head = repo.head_commit().unwrap();
    let id = head.blob_for(name).unwrap();
    repo.store().get_blob(id).unwrap().text().into_owned()
}

#[test]
fn change_on_given_side_only_is_taken() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main side", &[("m", "1")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "other side", &[("f", "B")]);
    repo.checkout("main").unwrap();

    let outcome = repo.merge("other").unwrap();
    assert!(matches!(outcome, MergeOutcome::Merged { ref conflicts, .. } if conflicts.is_empty()));
    assert_eq!(outcome.message(), None);
    assert_eq!(read(&repo, "f").as_deref(), Some("B"));
    assert_eq!(staged_or_committed(&repo, "f"), "B");
    assert_eq!(repo.head_commit().unwrap().message, "Merged other into main.");
}

#[test]
fn divergent_change_commits_conflict_markers() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main edit", &[("f", "B")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "other edit", &[("f", "C")]);
    repo.checkout("main").unwrap();

    let outcome = repo.merge("other").unwrap();
    assert_eq!(outcome.message(), Some("Encountered a merge conflict."));
    let expected = "<<<<<<< HEAD\nB\n=======\nC\n>>>>>>>\n";
    assert_eq!(read(&repo, "f").as_deref(), Some(expected));
    assert_eq!(staged_or_committed(&repo, "f"), expected);
    assert!(repo.index().is_empty());
    assert!(repo.head_commit().unwrap().is_merge());
}

#[test]
fn whitespace_only_side_keeps_blank_line_in_markers() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "blank out", &[("f", "   \n")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "other edit", &[("f", "C\n")]);
    repo.checkout("main").unwrap();

    assert!(repo.merge("other").unwrap().has_conflicts());
    assert_eq!(
        read(&repo, "f").as_deref(),
        Some("<<<<<<< HEAD\n\n=======\nC\n>>>>>>>\n")
    );
}

#[test]
fn file_only_in_given_is_checked_out() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main work", &[("m", "1")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "add g", &[("g", "X")]);
    repo.checkout("main").unwrap();
    assert_eq!(read(&repo, "g"), None);

    repo.merge("other").unwrap();
    assert_eq!(read(&repo, "g").as_deref(), Some("X"));
    assert_eq!(staged_or_committed(&repo, "g"), "X");
}

#[test]
fn deletion_on_given_side_is_applied() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main work", &[("m", "1")]);
    repo.checkout("other").unwrap();
    repo.rm("f").unwrap();
    repo.commit("drop f").unwrap();
    repo.checkout("main").unwrap();

    repo.merge("other").unwrap();
    assert_eq!(read(&repo, "f"), None);
    assert!(repo.head_commit().unwrap().blob_for("f").is_none());
    assert!(repo.head_commit().unwrap().blob_for("m").is_some());
}

#[test]
fn self_merge_is_rejected() {
    let mut repo = forked(SprigConfig::default());
    let before = repo.head_id().unwrap();
    let err = repo.merge("main").unwrap_err();
    assert!(err.is_user_error());
    assert_eq!(err.to_string(), "Cannot merge a branch with itself.");
    assert_eq!(repo.head_id().unwrap(), before);
}

#[test]
fn guard_order_checks_existence_first() {
    let mut repo = forked(SprigConfig::default());
    write(&mut repo, "pending", "p");
    repo.add("pending").unwrap();

    let err = repo.merge("ghost").unwrap_err();
    assert_eq!(err.to_string(), "A branch with that name does not exist.");
    let err = repo.merge("other").unwrap_err();
    assert_eq!(err.to_string(), "You have uncommitted changes.");
}

#[test]
fn fast_forward_moves_branch_without_new_commit() {
    let mut repo = forked(SprigConfig::default());
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "ahead", &[("f", "Z"), ("n", "new")]);
    let other_tip = repo.head_id().unwrap();
    repo.checkout("main").unwrap();

    let outcome = repo.merge("other").unwrap();
    assert_eq!(outcome, MergeOutcome::FastForward { target: other_tip });
    assert_eq!(outcome.message(), Some("Current branch fast-forwarded."));
    assert_eq!(repo.current_branch().unwrap(), "main");
    assert_eq!(repo.head_id().unwrap(), other_tip);
    assert_eq!(read(&repo, "n").as_deref(), Some("new"));
    assert_eq!(read(&repo, "f").as_deref(), Some("Z"));
}

#[test]
fn ancestor_branch_is_up_to_date_and_changes_nothing() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main ahead", &[("f", "B")]);
    let before = repo.head_id().unwrap();

    let outcome = repo.merge("other").unwrap();
    assert_eq!(outcome, MergeOutcome::AlreadyUpToDate);
    assert_eq!(repo.head_id().unwrap(), before);
    assert!(repo.branch_tip("other").unwrap().is_some());
    assert_eq!(read(&repo, "f").as_deref(), Some("B"));
}

#[test]
fn merging_twice_reports_up_to_date() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main", &[("m", "1")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "other", &[("o", "2")]);
    repo.checkout("main").unwrap();

    assert!(matches!(repo.merge("other").unwrap(), MergeOutcome::Merged { .. }));
    assert_eq!(repo.merge("other").unwrap(), MergeOutcome::AlreadyUpToDate);
}

#[test]
fn untracked_file_blocks_merge_without_changes() {
    let mut repo = forked(SprigConfig::default());
    commit_files(&mut repo, "main", &[("m", "1")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "other", &[("g", "theirs")]);
    repo.checkout("main").unwrap();
    write(&mut repo, "g", "mine");
    let before = repo.head_id().unwrap();

    let err = repo.merge("other").unwrap_err();
    assert!(matches!(err, SdkError::User(_)));
    assert_eq!(
        err.to_string(),
        "There is an untracked file in the way; delete it, or add and commit it first."
    );
    assert_eq!(repo.head_id().unwrap(), before);
    assert_eq!(read(&repo, "g").as_deref(), Some("mine"));
}

#[test]
fn lexicographic_traversal_merges_simple_fork() {
    let config = SprigConfig {
        merge: sprig_sdk::MergeConfig {
            traversal: TraversalOrder::Lexicographic,
        },
        ..SprigConfig::default()
    };
    let mut repo = forked(config);
    commit_files(&mut repo, "main edit", &[("f", "B")]);
    repo.checkout("other").unwrap();
    commit_files(&mut repo, "other add", &[("g", "G")]);
    repo.checkout("main").unwrap();

    let outcome = repo.merge("other").unwrap();
    assert!(!outcome.has_conflicts());
    assert_eq!(read(&repo, "f").as_deref(), Some("B"));
    assert_eq!(read(&repo, "g").as_deref(), Some("G"));
}
