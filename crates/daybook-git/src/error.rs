// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for daybook-git

use thiserror::Error;

/// Errors that can occur while reading repository history
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` process could not be started
    #[error("Failed to run git in {repo}: {source}")]
    Spawn {
        /// Repository the command was run against
        repo: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// `git log` ran but exited unsuccessfully
    #[error("git log failed in {repo} ({status}): {stderr}")]
    CommandFailed {
        /// Repository the command was run against
        repo: String,
        /// Exit status as reported by the OS
        status: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was expected to hold a repository
        path: String,
    },
}
