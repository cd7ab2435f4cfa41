// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Writing daily notes into spreadsheet rows
//!
//! The date-to-row mapping is a JSON object kept next to the spreadsheet it
//! describes:
//!
//! ```json
//! { "2025-09-30": 2, "2025-10-01": 3 }
//! ```
//!
//! Entries are processed in file order, one cell update per date. A failed
//! update is counted and reported; earlier updates are left in place.

use std::collections::BTreeMap;
use std::path::Path;

use daybook_sheets::{SheetsApi, SheetsClient, sheet_range};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::store::{StoreError, read_json};

/// Ordered date-to-row assignments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMapping {
    entries: Vec<(String, u32)>,
}

impl RowMapping {
    /// Build a mapping from `(date, row)` pairs, keeping their order
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse a JSON object of positive row numbers
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidMapping` if the value is not an object or
    /// any entry is not a positive integer row.
    pub fn from_json(value: Value) -> Result<Self, StoreError> {
        let Value::Object(map) = value else {
            return Err(StoreError::InvalidMapping(
                "expected a JSON object of date to row number".to_string(),
            ));
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, StoreError> {
        let mut entries = Vec::with_capacity(map.len());
        for (date, row) in map {
            let parsed = row
                .as_u64()
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    StoreError::InvalidMapping(format!(
                        "row for {date} must be a positive integer, got {row}"
                    ))
                })?;
            entries.push((date, parsed));
        }
        Ok(Self { entries })
    }

    /// Load a mapping file
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file is missing, unreadable, or malformed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let value: Value = read_json(path)?;
        Self::from_json(value)
    }

    /// Entries in mapping order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(date, row)| (date.as_str(), *row))
    }

    /// Number of mapped dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dates are mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Worksheet and column receiving the notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// Worksheet title
    pub worksheet: String,
    /// Column letters
    pub column: String,
}

impl SyncTarget {
    /// Range of the notes cell in `row`
    #[must_use]
    pub fn cell(&self, row: u32) -> String {
        sheet_range(&self.worksheet, &format!("{}{}", self.column, row))
    }
}

/// A date whose update was attempted and failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    /// Mapped date
    pub date: String,
    /// Error reported by the spreadsheet client
    pub error: String,
}

/// Tally of a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Cells written successfully
    pub updated: usize,
    /// Dates in the mapping
    pub total: usize,
    /// Mapped dates without notes
    pub skipped: Vec<String>,
    /// Mapped dates whose update failed
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    /// Whether every mapped date was written
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.updated == self.total
    }
}

/// Write each mapped date's notes into its row
///
/// Dates missing from `notes` are skipped without a call to the spreadsheet.
pub fn sync_notes<A: SheetsApi>(
    client: &SheetsClient<A>,
    notes: &BTreeMap<String, String>,
    mapping: &RowMapping,
    target: &SyncTarget,
) -> SyncReport {
    let mut report = SyncReport {
        total: mapping.len(),
        ..SyncReport::default()
    };

    for (date, row) in mapping.iter() {
        let Some(text) = notes.get(date) else {
            warn!(date = %date, row, "No notes for date");
            report.skipped.push(date.to_string());
            continue;
        };

        let range = target.cell(row);
        let outcome = client.update_cell(&range, text);
        match outcome.error() {
            None => {
                info!(date = %date, range = %range, "Updated notes");
                report.updated += 1;
            }
            Some(message) => {
                error!(date = %date, range = %range, error = %message, "Failed to update notes");
                report.failed.push(SyncFailure {
                    date: date.to_string(),
                    error: message.to_string(),
                });
            }
        }
    }

    info!(
        updated = report.updated,
        total = report.total,
        "Sync complete"
    );
    report
}
