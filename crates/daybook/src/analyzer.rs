// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! History aggregation across repositories
//!
//! Repositories are read one after another. A repository whose log cannot be
//! read is recorded in [`HistoryRun::failed_repos`] and contributes no
//! commits; the rest of the batch carries on.

use std::path::{Path, PathBuf};

use daybook_git::{CommitRecord, DateWindow, GitError, GitLog, RepoDiscoverer};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A repository whose log could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFailure {
    /// Repository directory name
    pub repo: String,
    /// Why reading failed
    pub reason: String,
}

/// Outcome of reading one repository
#[derive(Debug)]
pub enum RepoHistory {
    /// Commits in the window, possibly none
    Read(Vec<CommitRecord>),
    /// The log could not be read
    Failed(GitError),
}

/// Combined result of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRun {
    /// All commits, ordered by timestamp
    pub commits: Vec<CommitRecord>,
    /// Repositories that could not be read
    pub failed_repos: Vec<RepoFailure>,
    /// Number of repositories attempted
    pub repos_scanned: usize,
}

impl HistoryRun {
    /// Whether any commit was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Reads commit history for a set of repositories
#[derive(Debug, Clone, Default)]
pub struct HistoryAnalyzer {
    log: GitLog,
}

impl HistoryAnalyzer {
    /// Analyzer using the `git` found on `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer using a specific log reader
    #[must_use]
    pub fn with_log(log: GitLog) -> Self {
        Self { log }
    }

    /// List repositories under `root` matching `patterns`
    #[must_use]
    pub fn discover(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
        let repos = RepoDiscoverer::new(root, patterns.iter().cloned()).discover();
        info!(root = %root.display(), count = repos.len(), "Discovered repositories");
        repos
    }

    /// Read one repository
    pub fn read_repo(&self, repo: &Path, window: &DateWindow) -> RepoHistory {
        match self.log.read_commits(repo, window) {
            Ok(commits) => RepoHistory::Read(commits),
            Err(e) => RepoHistory::Failed(e),
        }
    }

    /// Read every repository and merge the commits in timestamp order
    ///
    /// The sort is stable: commits sharing a minute keep repository order.
    pub fn analyze_all_repos(&self, repos: &[PathBuf], window: &DateWindow) -> HistoryRun {
        let mut run = HistoryRun {
            repos_scanned: repos.len(),
            ..HistoryRun::default()
        };

        for repo in repos {
            let name = daybook_git::parser::repo_name(repo);
            match self.read_repo(repo, window) {
                RepoHistory::Read(commits) => {
                    info!(repo = %name, commits = commits.len(), "Analyzed repository");
                    run.commits.extend(commits);
                }
                RepoHistory::Failed(e) => {
                    warn!(repo = %name, error = %e, "Failed to read repository");
                    run.failed_repos.push(RepoFailure {
                        repo: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        run.commits.sort_by_key(|c| c.date);
        run
    }
}
