// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for daybook-git
//!
//! These tests scaffold real repositories with the `git` binary and read them
//! back through `GitLog` and `RepoDiscoverer`.

use chrono::NaiveDate;
use daybook_git::{DateWindow, GitError, GitLog, RepoDiscoverer};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};

static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is removed when dropped
struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "daybook-git-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        ));
        fs::create_dir_all(&path).expect("Failed to create temp directory");
        Self { path }
    }

    /// Initialize a repository named `name` under the root
    fn init_repo(&self, name: &str) -> PathBuf {
        let repo = self.path.join(name);
        fs::create_dir_all(&repo).expect("Failed to create repo directory");
        run_git(&repo, &["init", "-q"], None);
        run_git(&repo, &["config", "user.email", "test@example.com"], None);
        run_git(&repo, &["config", "user.name", "Test Author"], None);
        run_git(&repo, &["config", "commit.gpgsign", "false"], None);
        repo
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Run a git command, optionally pinning author and committer dates
fn run_git(dir: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir).args(args);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date);
    }
    let output = cmd.output().expect("Failed to run git command");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create an empty commit at a fixed UTC timestamp
fn commit_at(repo: &Path, message: &str, date: &str) {
    run_git(
        repo,
        &["commit", "-q", "--allow-empty", "-m", message],
        Some(date),
    );
}

fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    )
}

#[test]
fn test_read_commits_from_real_repository() {
    let root = TempRoot::new("read");
    let repo = root.init_repo("speakd");
    commit_at(&repo, "feat: first", "2025-10-01T10:15:00+0000");
    commit_at(&repo, "subject | with pipe", "2025-10-02T12:30:00+0000");

    let commits = GitLog::new()
        .read_commits(&repo, &window((2025, 9, 30), (2025, 10, 9)))
        .expect("git log should succeed");

    assert_eq!(commits.len(), 2);
    // git log lists newest first
    assert_eq!(commits[0].message, "subject | with pipe");
    assert_eq!(commits[0].date.to_string(), "2025-10-02 12:30:00");
    assert_eq!(commits[1].message, "feat: first");
    for commit in &commits {
        assert_eq!(commit.hash.len(), 40);
        assert_eq!(commit.author, "Test Author");
        assert_eq!(commit.repo, "speakd");
    }
}

#[test]
fn test_commits_outside_window_are_excluded() {
    let root = TempRoot::new("window");
    let repo = root.init_repo("app");
    commit_at(&repo, "old work", "2025-06-15T12:00:00+0000");
    commit_at(&repo, "fix: in range", "2025-10-05T12:00:00+0000");
    commit_at(&repo, "future work", "2025-12-15T12:00:00+0000");

    let commits = GitLog::new()
        .read_commits(&repo, &window((2025, 9, 30), (2025, 10, 9)))
        .expect("git log should succeed");

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "fix: in range");
}

#[test]
fn test_empty_window_is_ok_and_empty() {
    let root = TempRoot::new("empty");
    let repo = root.init_repo("quiet");
    commit_at(&repo, "chore: setup", "2025-06-15T12:00:00+0000");

    let commits = GitLog::new()
        .read_commits(&repo, &window((2025, 9, 30), (2025, 10, 9)))
        .expect("git log should succeed");

    assert!(commits.is_empty());
}

#[test]
fn test_repository_without_commits_is_empty() {
    let root = TempRoot::new("unborn");
    let repo = root.init_repo("fresh");

    let commits = GitLog::new()
        .read_commits(&repo, &window((2025, 9, 30), (2025, 10, 9)))
        .expect("a repository with no commits is not a failure");

    assert!(commits.is_empty());
}

#[test]
fn test_non_repository_is_reported_as_failure() {
    let root = TempRoot::new("notrepo");
    let plain = root.path.join("plain");
    fs::create_dir_all(&plain).unwrap();

    let result = GitLog::new().read_commits(&plain, &window((2025, 9, 30), (2025, 10, 9)));

    match result {
        Err(GitError::CommandFailed { repo, stderr, .. }) => {
            assert_eq!(repo, "plain");
            assert!(!stderr.is_empty());
        }
        other => panic!("Expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn test_discover_then_read() {
    let root = TempRoot::new("discover");
    let speakd = root.init_repo("speakd");
    commit_at(&speakd, "merge: branch", "2025-10-03T08:00:00+0000");
    fs::create_dir_all(root.path.join("scratch")).unwrap();

    let repos = RepoDiscoverer::new(&root.path, ["speakd", "nonexistent*"]).discover();
    assert_eq!(repos.len(), 1);
    assert!(repos[0].ends_with("speakd"));

    let commits = GitLog::new()
        .read_commits(&repos[0], &window((2025, 10, 1), (2025, 10, 3)))
        .expect("git log should succeed");
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "merge: branch");
}
