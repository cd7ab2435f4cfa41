// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! daybook-git: commit history collection for daybook
//!
//! This library crate finds local repositories under a root directory and
//! reads their commit history through the `git` binary, producing
//! [`CommitRecord`] values for the daily aggregation in `daybook`.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use daybook_git::{DateWindow, GitLog, RepoDiscoverer};
//!
//! let repos = RepoDiscoverer::new("/home/me/src", ["*"]).discover();
//! let window = DateWindow::new(
//!     NaiveDate::from_ymd_opt(2025, 9, 30).expect("valid date"),
//!     NaiveDate::from_ymd_opt(2025, 10, 9).expect("valid date"),
//! );
//!
//! for repo in &repos {
//!     let commits = GitLog::new().read_commits(repo, &window).expect("git log");
//!     for c in commits {
//!         println!("{} {} - {}", c.date, c.repo, c.message);
//!     }
//! }
//! ```

pub mod commit;
pub mod discover;
pub mod error;
pub mod parser;

pub use commit::CommitRecord;
pub use discover::RepoDiscoverer;
pub use error::GitError;
pub use parser::{DateWindow, GitLog, parse_log_line, parse_log_output};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitRecord;
    pub use crate::discover::RepoDiscoverer;
    pub use crate::error::GitError;
    pub use crate::parser::{DateWindow, GitLog};
}
