// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use daybook::daily::{generate_daily_notes, group_by_day, most_active_days};
use daybook_git::CommitRecord;

const MESSAGES: [&str; 5] = [
    "feat: add wake word detection to the listener",
    "fix: handle empty transcripts",
    "Merge branch 'release' into main",
    "update readme with install notes and a much longer explanation than fits",
    "chore: bump dependencies",
];

/// Build a month of synthetic commits spread across a handful of repositories
fn sample_commits(count: usize) -> Vec<CommitRecord> {
    let start = NaiveDate::from_ymd_opt(2025, 10, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid start date");

    (0..count)
        .map(|i| CommitRecord {
            hash: format!("{i:040x}"),
            date: start + Duration::minutes((i as i64 * 97) % (30 * 24 * 60)),
            message: MESSAGES[i % MESSAGES.len()].to_string(),
            author: format!("Author {}", i % 3),
            repo: format!("repo-{}", i % 7),
        })
        .collect()
}

fn narrative_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrative");

    for count in [100, 1_000, 10_000] {
        let commits = sample_commits(count);
        group.bench_with_input(
            BenchmarkId::new("generate_daily_notes", count),
            &commits,
            |b, commits| b.iter(|| generate_daily_notes(commits)),
        );
    }

    group.finish();
}

fn grouping_benchmarks(c: &mut Criterion) {
    let commits = sample_commits(1_000);
    let mut group = c.benchmark_group("grouping");

    group.bench_function("group_by_day_1000", |b| b.iter(|| group_by_day(&commits)));

    let days = group_by_day(&commits);
    group.bench_function("most_active_days_3", |b| {
        b.iter(|| most_active_days(&days, 3))
    });

    group.finish();
}

criterion_group!(benches, narrative_benchmarks, grouping_benchmarks);
criterion_main!(benches);
