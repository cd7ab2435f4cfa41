// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Spreadsheet command dispatch for `daybook sheets`
//!
//! Each command maps onto one [`SheetsClient`] operation. The result, success
//! or error, is returned as JSON; only missing command arguments are reported
//! as a Rust error.

use daybook_sheets::{SheetsApi, SheetsClient, sheet_range};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Cells read by `get` when no range is given
pub const DEFAULT_GET_CELLS: &str = "A1:Z1000";

/// Command-level failures that happen before any spreadsheet call
#[derive(Debug, Error)]
pub enum CommandError {
    /// A command was given too few arguments
    #[error("{command} command requires {requirement}")]
    MissingArguments {
        /// Command name
        command: &'static str,
        /// What was missing
        requirement: &'static str,
        /// Usage line
        usage: &'static str,
    },

    /// A result could not be converted to JSON
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Usage line for the failing command, if any
    #[must_use]
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            Self::MissingArguments { usage, .. } => Some(usage),
            Self::Json(_) => None,
        }
    }
}

/// Settings that shape how commands address the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    /// Worksheet used by `get` without a range and by `update-notes`
    pub default_worksheet: String,
    /// Column written by `update-notes`
    pub notes_column: String,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            default_worksheet: daybook_sheets::client::DEFAULT_WORKSHEET.to_string(),
            notes_column: "B".to_string(),
        }
    }
}

fn require<'a>(
    args: &'a [String],
    count: usize,
    command: &'static str,
    requirement: &'static str,
    usage: &'static str,
) -> Result<&'a [String], CommandError> {
    if args.len() < count {
        return Err(CommandError::MissingArguments {
            command,
            requirement,
            usage,
        });
    }
    Ok(args)
}

fn to_json<T: Serialize>(value: T) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(value)?)
}

/// Run one spreadsheet command
///
/// Command names are case-insensitive. Unknown commands yield
/// `{"error": "Unknown command: <name>"}`.
///
/// # Errors
///
/// Returns `CommandError::MissingArguments` when a command lacks required
/// arguments.
pub fn run_sheets_command<A: SheetsApi>(
    client: &SheetsClient<A>,
    context: &CommandContext,
    command: &str,
    args: &[String],
) -> Result<Value, CommandError> {
    let command = command.to_lowercase();
    debug!(command = %command, args = args.len(), "Running sheets command");

    match command.as_str() {
        "info" => to_json(client.get_spreadsheet_info()),
        "get" => {
            let range = args.first().cloned().unwrap_or_else(|| {
                sheet_range(&context.default_worksheet, DEFAULT_GET_CELLS)
            });
            to_json(client.get_worksheet_data(&range))
        }
        "values" => {
            let args = require(
                args,
                1,
                "values",
                "a range",
                "daybook sheets values <range>",
            )?;
            to_json(client.get_range_values(&args[0]))
        }
        "update" => {
            let args = require(
                args,
                2,
                "update",
                "range and value",
                "daybook sheets update <range> <value>",
            )?;
            to_json(client.update_cell(&args[0], &args[1]))
        }
        "update-notes" => {
            let args = require(
                args,
                2,
                "update-notes",
                "row number and notes",
                "daybook sheets update-notes <row_num> <notes>",
            )?;
            let cells = format!("{}{}", context.notes_column, args[0]);
            let range = sheet_range(&context.default_worksheet, &cells);
            to_json(client.update_cell(&range, &args[1]))
        }
        "append" => {
            let args = require(
                args,
                2,
                "append",
                "range and at least one cell value",
                "daybook sheets append <range> <cell>...",
            )?;
            to_json(client.append_rows(&args[0], &[args[1..].to_vec()]))
        }
        "create" => {
            let args = require(
                args,
                1,
                "create",
                "worksheet title",
                "daybook sheets create <sheet_title>",
            )?;
            to_json(client.create_worksheet(&args[0]))
        }
        "list-sheets" => to_json(client.list_worksheets()),
        other => Ok(json!({ "error": format!("Unknown command: {other}") })),
    }
}
