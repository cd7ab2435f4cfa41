// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for `daybook sheets` command dispatch against an in-memory workbook


use daybook::commands::{CommandContext, CommandError, run_sheets_command};
use daybook_sheets::{ClientSettings, SheetsClient};
use serde_json::{Value, json};
use similar_asserts::assert_eq;

use test_utils::{FakeSheets, Write};

fn client() -> SheetsClient<FakeSheets> {
    SheetsClient::with_api(
        FakeSheets::new(&["Sheet1", "daily"]),
        ClientSettings::new("tracker"),
    )
}

fn run(client: &SheetsClient<FakeSheets>, command: &str, args: &[&str]) -> Value {
    let args: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();
    run_sheets_command(client, &CommandContext::default(), command, &args)
        .expect("command should run")
}

#[test]
fn test_info() {
    let result = run(&client(), "info", &[]);
    assert_eq!(result["title"], "Productivity Tracker");
    assert_eq!(result["worksheets"][1]["title"], "daily");
    assert_eq!(result["worksheets"][1]["col_count"], 26);
}

#[test]
fn test_list_sheets() {
    let result = run(&client(), "list-sheets", &[]);
    let titles: Vec<&str> = result["worksheets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Sheet1", "daily"]);
}

#[test]
fn test_get_defaults_to_first_thousand_rows_of_default_worksheet() {
    let result = run(&client(), "get", &[]);
    assert_eq!(
        result,
        json!({"range": "Sheet1!A1:Z1000", "row_count": 0, "headers": [], "data": []})
    );
}

#[test]
fn test_update() {
    let client = client();
    let result = run(&client, "UPDATE", &["daily!C3", "3 commits"]);

    assert_eq!(
        result,
        json!({"success": true, "range": "daily!C3", "value": "3 commits"})
    );
    assert_eq!(
        client.api().unwrap().writes(),
        vec![Write {
            range: "'daily'!C3".to_string(),
            values: vec![vec![json!("3 commits")]],
        }]
    );
}

#[test]
fn test_update_notes_targets_notes_column() {
    let client = client();
    let result = run(&client, "update-notes", &["5", "Shipped the parser"]);
    assert_eq!(result["range"], "Sheet1!B5");

    let context = CommandContext {
        default_worksheet: "daily".to_string(),
        notes_column: "D".to_string(),
    };
    let args = vec!["7".to_string(), "Reviews".to_string()];
    let result = run_sheets_command(&client, &context, "update-notes", &args).unwrap();
    assert_eq!(result["range"], "daily!D7");
}

#[test]
fn test_update_notes_bad_row_is_error_result() {
    let client = client();
    let result = run(&client, "update-notes", &["five", "x"]);
    assert!(result["error"].as_str().unwrap().contains("Invalid range"));
    assert!(client.api().unwrap().writes().is_empty());
}

#[test]
fn test_create() {
    let result = run(&client(), "create", &["October"]);
    assert_eq!(result, json!({"success": true, "title": "October", "id": 99}));
}

#[test]
fn test_append_one_row() {
    let result = run(&client(), "append", &["daily!A1", "2025-10-01", "notes"]);
    assert_eq!(
        result,
        json!({"success": true, "range": "'daily'!A1", "rows": 1})
    );
}

#[test]
fn test_values_on_unknown_worksheet() {
    let result = run(&client(), "values", &["weekly!A1:B2"]);
    assert_eq!(result, json!({"error": "Worksheet not found: weekly"}));
}

#[test]
fn test_unknown_command() {
    let result = run(&client(), "delete", &["Sheet1"]);
    assert_eq!(result, json!({"error": "Unknown command: delete"}));
}

#[test]
fn test_missing_arguments_make_no_calls() {
    let client = client();
    let err = run_sheets_command(&client, &CommandContext::default(), "update", &[]).unwrap_err();

    assert!(matches!(
        err,
        CommandError::MissingArguments {
            command: "update",
            ..
        }
    ));
    assert!(client.api().unwrap().writes().is_empty());
}
