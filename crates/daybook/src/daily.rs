// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-day grouping and narrative rendering
//!
//! Commits are folded into one [`DailyAggregate`] per calendar day. Each
//! aggregate renders a short markdown-flavoured narrative:
//!
//! ```text
//! 🔧 **3 commits across 2 repositories**
//! 📂 **Active repos**: parser, speakd
//! ⏰ **Working hours**: 09:05 - 17:40
//! 🎯 **Key activities**:
//!    • 09:05 - feat: streaming decoder (parser)
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use daybook_git::CommitRecord;
use serde::Serialize;

/// Message fragments that mark a commit as a key activity
pub const KEYWORDS: [&str; 5] = ["feat", "fix", "merge", "refactor", "chore"];

/// Maximum key activities listed per day
pub const MAX_KEY_ACTIVITIES: usize = 5;

/// Messages longer than this many characters are truncated
pub const MAX_MESSAGE_CHARS: usize = 60;

const TRUNCATED_CHARS: usize = 57;
const ELLIPSIS: &str = "...";

const MAINTENANCE_LINE: &str =
    "📝 **Maintenance/organization work** - Infrastructure, documentation, or minor updates";

/// All commits of one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAggregate {
    date: NaiveDate,
    commits: Vec<CommitRecord>,
    repos: BTreeSet<String>,
    first_commit: NaiveDateTime,
    last_commit: NaiveDateTime,
}

impl DailyAggregate {
    fn new(commit: CommitRecord) -> Self {
        Self {
            date: commit.day(),
            repos: BTreeSet::from([commit.repo.clone()]),
            first_commit: commit.date,
            last_commit: commit.date,
            commits: vec![commit],
        }
    }

    /// Fold one more commit of the same day in
    fn push(&mut self, commit: CommitRecord) {
        self.repos.insert(commit.repo.clone());
        self.last_commit = commit.date;
        self.commits.push(commit);
    }

    /// The calendar day
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The day as `YYYY-MM-DD`
    #[must_use]
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Commits in the order they were folded in
    #[must_use]
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Distinct repository names, sorted
    #[must_use]
    pub fn repos(&self) -> &BTreeSet<String> {
        &self.repos
    }

    /// Number of commits
    #[must_use]
    pub fn total_commits(&self) -> usize {
        self.commits.len()
    }

    /// Timestamp of the first commit folded in
    #[must_use]
    pub fn first_commit(&self) -> NaiveDateTime {
        self.first_commit
    }

    /// Timestamp of the last commit folded in
    #[must_use]
    pub fn last_commit(&self) -> NaiveDateTime {
        self.last_commit
    }

    /// Commits whose message contains one of [`KEYWORDS`]
    pub fn key_activities(&self) -> impl Iterator<Item = &CommitRecord> {
        self.commits.iter().filter(|c| is_key_activity(&c.message))
    }

    /// Render the narrative text for this day
    #[must_use]
    pub fn narrative(&self) -> String {
        let repos: Vec<&str> = self.repos.iter().map(String::as_str).collect();

        let mut lines = vec![
            format!(
                "🔧 **{} commits across {} repositories**",
                self.total_commits(),
                repos.len()
            ),
            format!("📂 **Active repos**: {}", repos.join(", ")),
        ];

        if self.first_commit != self.last_commit {
            lines.push(format!(
                "⏰ **Working hours**: {} - {}",
                self.first_commit.format("%H:%M"),
                self.last_commit.format("%H:%M")
            ));
        }

        let mut activities = self.key_activities().take(MAX_KEY_ACTIVITIES).peekable();
        if activities.peek().is_some() {
            lines.push("🎯 **Key activities**:".to_string());
            lines.extend(activities.map(|c| {
                format!(
                    "   • {} - {} ({})",
                    c.time_of_day(),
                    truncate_message(&c.message),
                    c.repo
                )
            }));
        } else {
            lines.push(MAINTENANCE_LINE.to_string());
        }

        lines.join("\n")
    }
}

/// Commit count of one day, as listed by [`most_active_days`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    /// The calendar day
    pub date: NaiveDate,
    /// Commits on that day
    pub commits: usize,
}

/// Whether a commit message marks a key activity (case-insensitive)
#[must_use]
pub fn is_key_activity(message: &str) -> bool {
    let lower = message.to_lowercase();
    KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Shorten messages over [`MAX_MESSAGE_CHARS`] to 57 characters plus `...`
#[must_use]
pub fn truncate_message(message: &str) -> Cow<'_, str> {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return Cow::Borrowed(message);
    }
    let mut short: String = message.chars().take(TRUNCATED_CHARS).collect();
    short.push_str(ELLIPSIS);
    Cow::Owned(short)
}

/// Group commits by calendar day, in ascending date order
///
/// Within a day, commits keep their input order; the first and last
/// timestamps are those of the first and last commit folded in.
#[must_use]
pub fn group_by_day(commits: &[CommitRecord]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();
    for commit in commits {
        days.entry(commit.day())
            .and_modify(|day| day.push(commit.clone()))
            .or_insert_with(|| DailyAggregate::new(commit.clone()));
    }
    days.into_values().collect()
}

/// Narratives keyed by `YYYY-MM-DD`
#[must_use]
pub fn daily_notes(days: &[DailyAggregate]) -> BTreeMap<String, String> {
    days.iter()
        .map(|day| (day.date_key(), day.narrative()))
        .collect()
}

/// Group `commits` by day and render one narrative per day
#[must_use]
pub fn generate_daily_notes(commits: &[CommitRecord]) -> BTreeMap<String, String> {
    daily_notes(&group_by_day(commits))
}

/// The `limit` busiest days, most commits first, ties in date order
#[must_use]
pub fn most_active_days(days: &[DailyAggregate], limit: usize) -> Vec<DayActivity> {
    let mut activity: Vec<DayActivity> = days
        .iter()
        .map(|day| DayActivity {
            date: day.date(),
            commits: day.total_commits(),
        })
        .collect();
    activity.sort_by(|a, b| b.commits.cmp(&a.commits).then(a.date.cmp(&b.date)));
    activity.truncate(limit);
    activity
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_commit() -> impl Strategy<Value = CommitRecord> {
        (0u32..10, 0u32..24, 0u32..60, "[a-zA-Z :#]{0,80}", "[a-c]")
            .prop_map(|(day, hour, minute, message, repo)| CommitRecord {
                hash: "f".repeat(40),
                date: NaiveDate::from_ymd_opt(2025, 10, 1 + day)
                    .and_then(|d| d.and_hms_opt(hour, minute, 0))
                    .expect("valid timestamp"),
                message,
                author: "Dev".to_string(),
                repo,
            })
    }

    proptest! {
        /// Property: one narrative per distinct day, keys ascending
        #[test]
        fn prop_one_note_per_day(mut commits in prop::collection::vec(arb_commit(), 0..40)) {
            commits.sort_by_key(|c| c.date);
            let notes = generate_daily_notes(&commits);
            let distinct: BTreeSet<NaiveDate> = commits.iter().map(CommitRecord::day).collect();

            prop_assert_eq!(notes.len(), distinct.len());
            let keys: Vec<&String> = notes.keys().collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }

        /// Property: narratives are deterministic
        #[test]
        fn prop_narrative_deterministic(commits in prop::collection::vec(arb_commit(), 1..20)) {
            prop_assert_eq!(generate_daily_notes(&commits), generate_daily_notes(&commits));
        }

        /// Property: a day without key activities gets the maintenance line
        #[test]
        fn prop_maintenance_iff_no_keywords(commits in prop::collection::vec(arb_commit(), 1..20)) {
            for day in group_by_day(&commits) {
                let narrative = day.narrative();
                let has_key = day.commits().iter().any(|c| is_key_activity(&c.message));
                prop_assert_eq!(narrative.contains("Key activities"), has_key);
                prop_assert_eq!(narrative.contains("Maintenance/organization work"), !has_key);
            }
        }

        /// Property: truncated messages are 60 characters, others untouched
        #[test]
        fn prop_truncation_length(message in "\\PC{0,120}") {
            let rendered = truncate_message(&message);
            if message.chars().count() > MAX_MESSAGE_CHARS {
                prop_assert_eq!(rendered.chars().count(), 60);
                prop_assert!(rendered.ends_with("..."));
            } else {
                prop_assert_eq!(rendered.as_ref(), message.as_str());
            }
        }
    }
}
