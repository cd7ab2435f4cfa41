// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The analysis document
//!
//! One JSON file per analyzer run, indented two spaces:
//!
//! ```json
//! {
//!   "metadata": {
//!     "total_commits": 2,
//!     "total_repos": 1,
//!     "active_days": 1,
//!     "date_range": { "start": "2025-10-01 09:00", "end": "2025-10-01 17:30" },
//!     "failed_repos": []
//!   },
//!   "daily_notes": { "2025-10-01": "🔧 **2 commits across 1 repositories**\n..." },
//!   "all_commits": [ { "hash": "...", "date": "2025-10-01 09:00", ... } ]
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use daybook_git::CommitRecord;
use daybook_git::commit::minute_format;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::analyzer::RepoFailure;

/// Errors reading or writing JSON files
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file does not exist
    #[error("{0} not found. Run `daybook analyze` first.")]
    NotFound(PathBuf),

    /// Any other IO failure
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The row mapping contains something other than positive row numbers
    #[error("Invalid row mapping: {0}")]
    InvalidMapping(String),
}

/// First and last commit timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest commit, `null` when there are none
    #[serde(with = "minute_format::option")]
    pub start: Option<NaiveDateTime>,
    /// Latest commit, `null` when there are none
    #[serde(with = "minute_format::option")]
    pub end: Option<NaiveDateTime>,
}

/// Summary counts of an analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of commits
    pub total_commits: usize,
    /// Number of distinct repositories with commits
    pub total_repos: usize,
    /// Number of days with commits
    pub active_days: usize,
    /// Timestamp span of the commits
    pub date_range: DateRange,
    /// Repositories that could not be read
    #[serde(default)]
    pub failed_repos: Vec<RepoFailure>,
}

/// The persisted result of one analyzer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    /// Summary counts
    pub metadata: Metadata,
    /// Narrative text keyed by `YYYY-MM-DD`
    pub daily_notes: BTreeMap<String, String>,
    /// Every commit, in timestamp order
    pub all_commits: Vec<CommitRecord>,
}

impl AnalysisDocument {
    /// Assemble a document from ordered commits and their narratives
    ///
    /// The date range is taken from the first and last element of
    /// `commits`, which must already be sorted.
    #[must_use]
    pub fn new(
        commits: Vec<CommitRecord>,
        daily_notes: BTreeMap<String, String>,
        failed_repos: Vec<RepoFailure>,
    ) -> Self {
        let repos: BTreeSet<&str> = commits.iter().map(|c| c.repo.as_str()).collect();
        let metadata = Metadata {
            total_commits: commits.len(),
            total_repos: repos.len(),
            active_days: daily_notes.len(),
            date_range: DateRange {
                start: commits.first().map(|c| c.date),
                end: commits.last().map(|c| c.date),
            },
            failed_repos,
        };

        Self {
            metadata,
            daily_notes,
            all_commits: commits,
        }
    }

    /// Write the document as indented JSON, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), commits = self.metadata.total_commits, "Saved analysis");
        Ok(())
    }

    /// Read a document written by [`AnalysisDocument::save`]
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the file is absent and
    /// `StoreError::Json` if it does not parse.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let document: Self = read_json(path)?;
        debug!(
            path = %path.display(),
            days = document.daily_notes.len(),
            "Loaded analysis"
        );
        Ok(document)
    }
}

/// Read and deserialize a JSON file
pub(crate) fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
