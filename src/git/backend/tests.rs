// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CloneOptions, CommitIdentity, GitEngine, VcsEngine};
use crate::error::{GitError, GixError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn engine() -> GitEngine {
    GitEngine::resolve(
        None,
        Some(CommitIdentity {
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
        }),
    )
    .expect("git should be in PATH")
}

/// Initialize a repository on `main` with one commit (README.md).
/// Uses shell git to avoid coupling tests to the engine under test.
fn init_test_repo_with_commit(path: &Path) {
    let run = |args: &[&str]| {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    };
    run(&["init", "-q", "-b", "main"]);
    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    run(&["add", "README.md"]);
    run(&["commit", "-q", "-m", "Initial commit"]);
}

#[test]
fn test_open_rejects_non_repository() {
    let temp = temp_dir();
    let result = engine().open(temp.path());
    assert!(matches!(result, Err(GitError::Gix(GixError::Open(_)))));
}

#[test]
fn test_open_and_query_head() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();

    let repo = engine.open(temp.path()).unwrap();
    assert_eq!(repo.path(), temp.path());
    assert_eq!(engine.current_branch(&repo).unwrap().as_deref(), Some("main"));
    assert_eq!(engine.list_local_branches(&repo).unwrap(), vec!["main"]);

    let head = engine.head_commit(&repo).unwrap().expect("HEAD has a commit");
    assert_eq!(head.len(), 40);
}

#[test]
fn test_create_branch_and_checkout() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    engine.create_branch(&repo, "feature", "main").unwrap();
    assert_eq!(
        engine.list_local_branches(&repo).unwrap(),
        vec!["feature", "main"]
    );
    // Creating does not switch branches.
    assert_eq!(engine.current_branch(&repo).unwrap().as_deref(), Some("main"));

    engine.checkout(&repo, "feature").unwrap();
    assert_eq!(
        engine.current_branch(&repo).unwrap().as_deref(),
        Some("feature")
    );
}

#[test]
fn test_checkout_unknown_branch_fails() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    let err = engine.checkout(&repo, "does-not-exist").unwrap_err();
    assert!(
        matches!(&err, GitError::CheckoutFailed { what, .. } if what == "does-not-exist"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_detached_head_has_no_branch() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    let head = engine.head_commit(&repo).unwrap().unwrap();
    engine.checkout(&repo, &head).unwrap();
    assert_eq!(engine.current_branch(&repo).unwrap(), None);
    assert_eq!(engine.head_commit(&repo).unwrap(), Some(head));
}

#[test]
fn test_status_lists_and_commit() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    assert!(!engine.is_dirty(&repo).unwrap());

    std::fs::write(temp.path().join("README.md"), "# Changed\n").unwrap();
    std::fs::write(temp.path().join("new.txt"), "new\n").unwrap();

    assert!(engine.is_dirty(&repo).unwrap());
    assert_eq!(engine.unstaged_modified_files(&repo).unwrap(), vec!["README.md"]);
    assert_eq!(engine.untracked_files(&repo).unwrap(), vec!["new.txt"]);
    assert!(engine.staged_files(&repo).unwrap().is_empty());

    engine
        .stage_paths(&repo, &[PathBuf::from("new.txt")])
        .unwrap();
    assert_eq!(engine.staged_files(&repo).unwrap(), vec!["new.txt"]);

    let id = engine.commit(&repo, "add new.txt").unwrap();
    assert_eq!(id.len(), 40);
    assert_eq!(engine.commit_message(&repo, &id).unwrap(), "add new.txt");
    assert!(engine.staged_files(&repo).unwrap().is_empty());
    assert_eq!(engine.unstaged_modified_files(&repo).unwrap(), vec!["README.md"]);
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    let err = engine.commit(&repo, "empty").unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
}

#[test]
fn test_stage_missing_path_fails() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    let result = engine.stage_paths(&repo, &[PathBuf::from("missing.txt")]);
    assert!(matches!(result, Err(GitError::CommandFailed { .. })));
}

#[test]
fn test_clone_invalid_url_fails() {
    let temp = temp_dir();
    let dest = temp.path().join("clone");
    let missing = temp.path().join("no-such-repo");
    let url = missing.to_str().unwrap();

    let err = engine()
        .clone_from(url, &dest, &CloneOptions::default())
        .unwrap_err();
    assert!(
        matches!(&err, GitError::CloneFailed { url: u, .. } if u == url),
        "unexpected error: {err}"
    );
}

#[test]
fn test_clone_local_repository_with_branch() {
    let temp = temp_dir();
    let source = temp.path().join("source");
    std::fs::create_dir_all(&source).unwrap();
    init_test_repo_with_commit(&source);

    let engine = engine();
    let origin = engine.open(&source).unwrap();
    engine.create_branch(&origin, "dev", "main").unwrap();

    let dest = temp.path().join("clone");
    let options = CloneOptions::builder().with_branch("dev".to_string()).build();
    let repo = engine
        .clone_from(source.to_str().unwrap(), &dest, &options)
        .unwrap();

    assert_eq!(repo.path(), dest.as_path());
    assert_eq!(engine.current_branch(&repo).unwrap().as_deref(), Some("dev"));
    assert_eq!(engine.list_remotes(&repo).unwrap(), vec!["origin"]);
}

#[test]
fn test_clone_relative_url_resolves_from_current_directory() {
    // Source and destination parents differ, so the URL only resolves from
    // the process working directory.
    let temp = tempfile::tempdir_in(".").expect("failed to create temp dir");
    let source = temp.path().join("upstream");
    std::fs::create_dir_all(&source).unwrap();
    init_test_repo_with_commit(&source);
    assert!(source.is_relative());

    let parent = std::path::absolute(temp.path().join("sub")).unwrap();
    std::fs::create_dir_all(&parent).unwrap();
    let dest = parent.join("dest");

    let engine = engine();
    let repo = engine
        .clone_from(source.to_str().unwrap(), &dest, &CloneOptions::default())
        .unwrap();

    assert!(dest.join("README.md").exists());
    assert_eq!(engine.current_branch(&repo).unwrap().as_deref(), Some("main"));
}

#[test]
fn test_checkout_never_restores_file_named_like_branch() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let run = |args: &[&str]| {
        let status = Command::new("git")
            .args(args)
            .current_dir(temp.path())
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {args:?} failed");
    };
    std::fs::write(temp.path().join("dev"), "committed\n").unwrap();
    run(&["add", "dev"]);
    run(&["commit", "-q", "-m", "Add dev file"]);
    std::fs::write(temp.path().join("dev"), "precious local edit\n").unwrap();

    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();
    let err = engine.checkout(&repo, "dev").unwrap_err();

    assert!(
        matches!(&err, GitError::CheckoutFailed { what, .. } if what == "dev"),
        "unexpected error: {err}"
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("dev")).unwrap(),
        "precious local edit\n"
    );
    assert_eq!(engine.current_branch(&repo).unwrap().as_deref(), Some("main"));
}

#[test]
fn test_create_branch_from_missing_start_point() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();

    let err = engine.create_branch(&repo, "feature", "missing").unwrap_err();
    assert!(
        matches!(&err, GitError::BranchNotFound { branch } if branch == "missing"),
        "unexpected error: {err}"
    );
    assert_eq!(engine.list_local_branches(&repo).unwrap(), vec!["main"]);
}

#[test]
fn test_status_on_unborn_head() {
    let temp = temp_dir();
    let status = Command::new("git")
        .args(["init", "-q", "-b", "main"])
        .current_dir(temp.path())
        .status()
        .expect("failed to run git");
    assert!(status.success());
    std::fs::write(temp.path().join("new.txt"), "new\n").unwrap();

    let engine = engine();
    let repo = engine.open(temp.path()).unwrap();
    assert_eq!(engine.head_commit(&repo).unwrap(), None);

    let tree = engine.working_tree_status(&repo).unwrap();
    assert_eq!(tree.untracked, vec!["new.txt"]);
    assert!(!engine.is_dirty(&repo).unwrap());

    engine
        .stage_paths(&repo, &[PathBuf::from("new.txt")])
        .unwrap();
    let tree = engine.working_tree_status(&repo).unwrap();
    assert_eq!(tree.staged, vec!["new.txt"]);
    assert!(tree.untracked.is_empty());
    assert!(engine.is_dirty(&repo).unwrap());
}
