// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI parsing and validation tests
//!
//! These tests verify flag combinations across the `analyze`, `sheets` and
//! `sync` subcommands.


use std::path::PathBuf;

use clap::Parser;
use daybook::config::{Command, Config, ConfigError};
use tracing::Level;

use test_utils::TempTestDir;

fn parse(args: &[&str]) -> Result<Config, clap::Error> {
    Config::try_parse_from(std::iter::once("daybook").chain(args.iter().copied()))
}

// ============================================================================
// Global flags
// ============================================================================

#[test]
fn test_verbose_after_subcommand() {
    let config = parse(&["analyze", "--verbose"]).expect("parse should succeed");
    assert!(config.verbose);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_wins_over_quiet() {
    let config = parse(&["-v", "-q", "analyze"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    // Boolean flags are toggled by presence only
    let result = parse(&["--verbose=true", "analyze"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

#[test]
fn test_subcommand_required() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["report"]).is_err());
}

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_all_flags() {
    let config = parse(&[
        "analyze",
        "--repos-dir",
        "/srv/repos",
        "--pattern",
        "speakd",
        "--pattern",
        "CleanShot*",
        "--start-date",
        "2025-10-01",
        "--end-date",
        "2025-10-31",
        "--output",
        "october.json",
        "--discover",
    ])
    .expect("parse should succeed");

    let Command::Analyze(args) = config.command else {
        panic!("expected analyze");
    };
    assert!(args.discover);
    assert_eq!(args.analysis.repos_dir, Some(PathBuf::from("/srv/repos")));
    assert_eq!(args.analysis.patterns, vec!["speakd", "CleanShot*"]);
    assert_eq!(args.analysis.window().start.to_string(), "2025-10-01");
    assert_eq!(args.analysis.window().end.to_string(), "2025-10-31");
    assert_eq!(args.analysis.output, PathBuf::from("october.json"));
}

#[test]
fn test_analyze_rejects_malformed_date() {
    assert!(parse(&["analyze", "--start-date", "10/01/2025"]).is_err());
    assert!(parse(&["analyze", "--end-date", "2025-02-30"]).is_err());
}

#[test]
fn test_analyze_repos_dir_is_file() {
    let temp = TempTestDir::new("cli-file");
    let file = temp.create_file("not-a-dir", "");
    let file = file.display().to_string();

    let config = parse(&["analyze", "--repos-dir", &file]).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ReposDirNotDirectory(_))
    ));
}

#[test]
fn test_single_day_window_is_valid() {
    let temp = TempTestDir::new("cli-day");
    let dir = temp.path().display().to_string();
    let config = parse(&[
        "analyze",
        "--repos-dir",
        &dir,
        "--start-date",
        "2025-10-01",
        "--end-date",
        "2025-10-01",
    ])
    .unwrap();
    assert!(config.validate().is_ok());
}

// ============================================================================
// sheets
// ============================================================================

#[test]
fn test_sheets_requires_command() {
    assert!(parse(&["sheets", "--sheet-id", "abc"]).is_err());
}

#[test]
fn test_sheets_options() {
    let config = parse(&[
        "sheets",
        "--sheet-id",
        "abc",
        "--default-worksheet",
        "daily",
        "--notes-column",
        "D",
        "update-notes",
        "4",
        "Paired on the release",
    ])
    .unwrap();
    assert!(config.validate().is_ok());

    let Command::Sheets(args) = config.command else {
        panic!("expected sheets");
    };
    assert_eq!(args.sheet.sheet_id(), "abc");
    assert_eq!(args.default_worksheet, "daily");
    assert_eq!(args.notes_column, "D");
    assert_eq!(args.command, "update-notes");
    assert_eq!(args.args, vec!["4", "Paired on the release"]);
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_sync_with_refresh_validates_analysis_inputs() {
    let config = parse(&[
        "sync",
        "--refresh",
        "--sheet-id",
        "abc",
        "--rows",
        "rows.json",
        "--repos-dir",
        "/nonexistent/path/12345",
    ])
    .unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ReposDirNotFound(_))
    ));
}

#[test]
fn test_sync_without_refresh_ignores_repos_dir() {
    let config = parse(&[
        "sync",
        "--sheet-id",
        "abc",
        "--rows",
        "rows.json",
        "--repos-dir",
        "/nonexistent/path/12345",
    ])
    .unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_sync_bad_column() {
    let config = parse(&[
        "sync",
        "--sheet-id",
        "abc",
        "--rows",
        "rows.json",
        "--column",
        "3",
    ])
    .unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidColumn(_))));
}
