// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository discovery
//!
//! Expands name patterns against the immediate children of a root directory
//! and keeps the entries that hold a `.git` directory.

use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the version-control metadata entry that marks a repository
pub const GIT_METADATA_DIR: &str = ".git";

/// Finds repositories under a root directory by name pattern
#[derive(Debug, Clone)]
pub struct RepoDiscoverer {
    root: PathBuf,
    patterns: Vec<String>,
}

impl RepoDiscoverer {
    /// Create a discoverer for `root` with an ordered list of name patterns
    ///
    /// Patterns use glob syntax (`*`, `?`, `[abc]`, `{a,b}`) and are matched
    /// against child names only, never across directory separators.
    pub fn new<I, S>(root: impl Into<PathBuf>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Discover repositories
    ///
    /// Results are grouped by pattern in configuration order; within one
    /// pattern, matches are ordered by name. A path matched by several
    /// patterns appears once per pattern. Patterns that match nothing, fail
    /// to compile, or point at a missing root contribute nothing.
    ///
    /// Hidden directories (leading `.`) only match patterns that themselves
    /// start with `.`.
    #[must_use]
    pub fn discover(&self) -> Vec<PathBuf> {
        let root = std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone());
        let children = list_children(&root);
        let mut repositories = Vec::new();

        for pattern in &self.patterns {
            let Some(matcher) = compile(pattern) else {
                continue;
            };

            let include_hidden = pattern.starts_with('.');
            let before = repositories.len();
            repositories.extend(
                children
                    .iter()
                    .filter(|(name, _)| include_hidden || !name.starts_with('.'))
                    .filter(|(name, _)| matcher.is_match(name))
                    .filter(|(_, path)| is_repository(path))
                    .map(|(_, path)| path.clone()),
            );
            debug!(
                pattern = %pattern,
                matched = repositories.len() - before,
                "Expanded repository pattern"
            );
        }

        for repo in &repositories {
            debug!(repo = %repo.display(), "Found repository");
        }
        repositories
    }
}

/// Whether a directory holds git metadata
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.join(GIT_METADATA_DIR).exists()
}

fn compile(pattern: &str) -> Option<GlobMatcher> {
    match Glob::new(pattern) {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Ignoring invalid repository pattern");
            None
        }
    }
}

/// Immediate child directories of `root`, sorted by name
fn list_children(root: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "Repository root not readable");
            return Vec::new();
        }
    };

    let mut children: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    children.sort();
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// Scratch directory removed on drop
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "daybook-discover-{}-{}-{}",
                name,
                std::process::id(),
                COUNTER.fetch_add(1, Ordering::SeqCst)
            ));
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn repo(&self, name: &str) -> PathBuf {
            let path = self.0.join(name);
            fs::create_dir_all(path.join(GIT_METADATA_DIR)).unwrap();
            path
        }

        fn plain_dir(&self, name: &str) -> PathBuf {
            let path = self.0.join(name);
            fs::create_dir_all(&path).unwrap();
            path
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| crate::parser::repo_name(p)).collect()
    }

    #[test]
    fn test_literal_and_missing_patterns() {
        let scratch = Scratch::new("literal");
        scratch.repo("speakd");

        let found = RepoDiscoverer::new(&scratch.0, ["speakd", "nonexistent*"]).discover();
        assert_eq!(names(&found), vec!["speakd"]);
        assert!(found[0].is_absolute());
    }

    #[test]
    fn test_wildcard_pattern_sorted() {
        let scratch = Scratch::new("wildcard");
        scratch.repo("CleanShot-b");
        scratch.repo("CleanShot-a");
        scratch.repo("other");

        let found = RepoDiscoverer::new(&scratch.0, ["CleanShot*"]).discover();
        assert_eq!(names(&found), vec!["CleanShot-a", "CleanShot-b"]);
    }

    #[test]
    fn test_pattern_order_preserved() {
        let scratch = Scratch::new("order");
        scratch.repo("alpha");
        scratch.repo("zeta");

        let found = RepoDiscoverer::new(&scratch.0, ["zeta", "alpha"]).discover();
        assert_eq!(names(&found), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_directories_without_git_are_skipped() {
        let scratch = Scratch::new("nogit");
        scratch.plain_dir("notes");
        scratch.repo("app");

        let found = RepoDiscoverer::new(&scratch.0, ["*"]).discover();
        assert_eq!(names(&found), vec!["app"]);
    }

    #[test]
    fn test_overlapping_patterns_are_not_deduplicated() {
        let scratch = Scratch::new("dupes");
        scratch.repo("speakd");

        let found = RepoDiscoverer::new(&scratch.0, ["speakd", "speak*"]).discover();
        assert_eq!(names(&found), vec!["speakd", "speakd"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let found =
            RepoDiscoverer::new("/nonexistent/daybook/root/12345", ["*", "speakd"]).discover();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        let scratch = Scratch::new("invalid");
        scratch.repo("app");

        let found = RepoDiscoverer::new(&scratch.0, ["[unclosed", "app"]).discover();
        assert_eq!(names(&found), vec!["app"]);
    }

    #[test]
    fn test_hidden_directories_need_dot_pattern() {
        let scratch = Scratch::new("hidden");
        scratch.repo(".dotfiles");
        scratch.repo("app");

        let found = RepoDiscoverer::new(&scratch.0, ["*"]).discover();
        assert_eq!(names(&found), vec!["app"]);

        let found = RepoDiscoverer::new(&scratch.0, [".*"]).discover();
        assert_eq!(names(&found), vec![".dotfiles"]);
    }

    #[test]
    fn test_git_file_counts_as_repository() {
        let scratch = Scratch::new("worktree");
        let path = scratch.plain_dir("linked");
        fs::write(path.join(GIT_METADATA_DIR), "gitdir: /elsewhere").unwrap();

        assert!(is_repository(&path));
    }
}
