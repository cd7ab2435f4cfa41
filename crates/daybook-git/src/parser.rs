// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log collection and parsing
//!
//! Commits are read by running `git log` with a fixed one-line-per-commit
//! format (`hash|date|subject|author`) and parsing its output.

use crate::commit::{CommitRecord, TIMESTAMP_FORMAT};
use crate::error::GitError;
use chrono::{NaiveDate, NaiveDateTime};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Field separator used in the requested log format
pub const FIELD_SEPARATOR: char = '|';

/// Inclusive calendar-day window for a log query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day, from 00:00:00
    pub start: NaiveDate,
    /// Last day, through 23:59:59
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window covering `start` through `end`, both inclusive
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Value for `git log --since`
    #[must_use]
    pub fn since_arg(&self) -> String {
        format!("--since={} 00:00:00", self.start.format("%Y-%m-%d"))
    }

    /// Value for `git log --until`
    #[must_use]
    pub fn until_arg(&self) -> String {
        format!("--until={} 23:59:59", self.end.format("%Y-%m-%d"))
    }
}

/// Runs `git log` against local repositories
#[derive(Debug, Clone)]
pub struct GitLog {
    program: OsString,
}

impl Default for GitLog {
    fn default() -> Self {
        Self::new()
    }
}

impl GitLog {
    /// Use the `git` binary found on `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
        }
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Read the commits of one repository inside a date window
    ///
    /// Every commit is tagged with the repository's base directory name.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a directory,
    /// `GitError::Spawn` if git cannot be started and
    /// `GitError::CommandFailed` if it exits unsuccessfully. A repository with
    /// no commits in the window, or no commits at all, yields `Ok` with an
    /// empty list.
    pub fn read_commits(
        &self,
        repo_path: impl AsRef<Path>,
        window: &DateWindow,
    ) -> Result<Vec<CommitRecord>, GitError> {
        let repo_path = repo_path.as_ref();
        let repo = repo_name(repo_path);
        if !repo_path.is_dir() {
            return Err(GitError::RepositoryNotFound {
                path: repo_path.display().to_string(),
            });
        }

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(repo_path)
            .arg("log")
            .arg(window.since_arg())
            .arg(window.until_arg())
            .arg("--pretty=format:%H|%ad|%s|%an")
            .arg(format!("--date=format:{TIMESTAMP_FORMAT}"))
            .arg("--no-patch")
            .output()
            .map_err(|source| GitError::Spawn {
                repo: repo.clone(),
                source,
            })?;

        if !output.status.success() {
            if self.is_unborn(repo_path) {
                debug!(repo = %repo, "Repository has no commits yet");
                return Ok(Vec::new());
            }
            return Err(GitError::CommandFailed {
                repo,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let commits = parse_log_output(&stdout, &repo);
        debug!(repo = %repo, commits = commits.len(), "Read git log");
        Ok(commits)
    }

    /// Whether `repo_path` is a repository whose `HEAD` has no commit yet
    fn is_unborn(&self, repo_path: &Path) -> bool {
        self.git_succeeds(repo_path, &["rev-parse", "--git-dir"])
            && !self.git_succeeds(repo_path, &["rev-parse", "--verify", "-q", "HEAD"])
    }

    fn git_succeeds(&self, repo_path: &Path, args: &[&str]) -> bool {
        Command::new(&self.program)
            .arg("-C")
            .arg(repo_path)
            .args(args)
            .output()
            .is_ok_and(|output| output.status.success())
    }
}

/// Base directory name of a repository path
#[must_use]
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the full output of the formatted `git log`
///
/// Blank lines are ignored; lines that cannot be parsed are skipped with a
/// warning.
#[must_use]
pub fn parse_log_output(output: &str, repo: &str) -> Vec<CommitRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_log_line(line, repo);
            if parsed.is_none() {
                warn!(repo = %repo, line = %line, "Skipping unparseable log line");
            }
            parsed
        })
        .collect()
}

/// Parse one `hash|date|subject|author` line
///
/// Hash and date are taken from the left and the author from the right, so a
/// subject that itself contains `|` is kept whole.
#[must_use]
pub fn parse_log_line(line: &str, repo: &str) -> Option<CommitRecord> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut head = line.splitn(3, FIELD_SEPARATOR);
    let hash = head.next()?.trim();
    let date = head.next()?.trim();
    let rest = head.next()?;
    let (message, author) = rest.rsplit_once(FIELD_SEPARATOR)?;

    if hash.is_empty() {
        return None;
    }
    let date = NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT).ok()?;

    Some(CommitRecord {
        hash: hash.to_string(),
        date,
        message: message.to_string(),
        author: author.to_string(),
        repo: repo.to_string(),
    })
}
