// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error-as-data spreadsheet client
//!
//! [`SheetsClient`] starts unauthenticated. A successful
//! [`SheetsClient::authenticate`] opens the configured workbook; from then on
//! every operation returns an [`Outcome`], serialized either as the payload or
//! as `{"error": "..."}`.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::api::{HttpSheetsApi, SheetsApi, WorksheetInfo};
use crate::credentials::ServiceAccount;
use crate::error::SheetsError;
use crate::range::{SheetRange, qualified};

/// Worksheet used when a range names none
pub const DEFAULT_WORKSHEET: &str = "Sheet1";

/// Grid size of worksheets created by [`SheetsClient::create_worksheet`]
pub const NEW_WORKSHEET_ROWS: u32 = 1000;
/// See [`NEW_WORKSHEET_ROWS`]
pub const NEW_WORKSHEET_COLS: u32 = 26;

// ============================================================================
// Outcome
// ============================================================================

/// Result of a client operation: payload or error message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    /// The operation succeeded
    Success(T),
    /// The operation failed
    Failure {
        /// Human-readable failure description
        error: String,
    },
}

impl<T> Outcome<T> {
    /// Whether this outcome carries an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The error message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// The payload, if any
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Convert into a standard `Result`
    ///
    /// # Errors
    ///
    /// Returns the error message of a failed outcome.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { error } => Err(error),
        }
    }
}

impl<T> From<Result<T, SheetsError>> for Outcome<T> {
    fn from(result: Result<T, SheetsError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => {
                debug!(error = %e, "Sheets operation failed");
                Self::Failure {
                    error: e.to_string(),
                }
            }
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Workbook title, URL and worksheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpreadsheetInfo {
    /// Workbook title
    pub title: String,
    /// Browser URL
    pub url: String,
    /// Worksheets in tab order
    pub worksheets: Vec<WorksheetInfo>,
}

/// Records read from a worksheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetData {
    /// The range as requested
    pub range: String,
    /// Number of records
    pub row_count: usize,
    /// Column names, empty when there are no records
    pub headers: Vec<String>,
    /// One map per data row, keyed by header
    pub data: Vec<Map<String, Value>>,
}

/// Raw values of a range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeValues {
    /// The range as requested
    pub range: String,
    /// Row-major values
    pub values: Vec<Vec<Value>>,
}

/// A single written cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellUpdate {
    /// Always true
    pub success: bool,
    /// `Worksheet!Cell` that was written
    pub range: String,
    /// Value written
    pub value: String,
}

/// Rows appended to a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendedRows {
    /// Always true
    pub success: bool,
    /// Range the API reports as written
    pub range: String,
    /// Number of rows appended
    pub rows: usize,
}

/// A newly created worksheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedWorksheet {
    /// Always true
    pub success: bool,
    /// Title of the new worksheet
    pub title: String,
    /// Sheet id assigned by the API
    pub id: i64,
}

/// All worksheets of the workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorksheetList {
    /// Worksheets in tab order
    pub worksheets: Vec<WorksheetInfo>,
}

// ============================================================================
// Client
// ============================================================================

/// Settings for one client session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Workbook to open
    pub spreadsheet_id: String,
    /// Worksheet used by ranges without a `Worksheet!` prefix
    pub default_worksheet: String,
}

impl ClientSettings {
    /// Settings for a workbook with the default worksheet `Sheet1`
    #[must_use]
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            default_worksheet: DEFAULT_WORKSHEET.to_string(),
        }
    }

    /// Override the default worksheet
    #[must_use]
    pub fn with_default_worksheet(mut self, worksheet: impl Into<String>) -> Self {
        self.default_worksheet = worksheet.into();
        self
    }
}

/// Spreadsheet session for one workbook
#[derive(Debug)]
pub struct SheetsClient<A = HttpSheetsApi> {
    api: Option<A>,
    settings: ClientSettings,
}

impl SheetsClient<HttpSheetsApi> {
    /// Create an unauthenticated client
    #[must_use]
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            api: None,
            settings,
        }
    }

    /// Authenticate with a service-account JSON payload and open the workbook
    ///
    /// Returns `false` and stays unauthenticated when the payload is absent or
    /// unusable, or the workbook cannot be opened. Once authenticated, further
    /// calls return `true` without doing anything.
    pub fn authenticate(&mut self, credentials: Option<&str>) -> bool {
        if self.api.is_some() {
            return true;
        }
        match self.connect(credentials) {
            Ok(api) => {
                self.api = Some(api);
                true
            }
            Err(e) => {
                error!(error = %e, "Authentication failed");
                false
            }
        }
    }

    fn connect(&self, credentials: Option<&str>) -> Result<HttpSheetsApi, SheetsError> {
        let json = credentials
            .filter(|c| !c.trim().is_empty())
            .ok_or(SheetsError::MissingCredentials)?;
        let account = ServiceAccount::from_json(json)?;
        let api = HttpSheetsApi::connect(&account, &self.settings.spreadsheet_id)?;

        let meta = api.spreadsheet()?;
        info!(title = %meta.title, worksheets = meta.worksheets.len(), "Opened spreadsheet");
        Ok(api)
    }
}

impl<A: SheetsApi> SheetsClient<A> {
    /// Wrap an already-authorized backend
    #[must_use]
    pub fn with_api(api: A, settings: ClientSettings) -> Self {
        Self {
            api: Some(api),
            settings,
        }
    }

    /// Whether `authenticate` has succeeded
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.is_some()
    }

    /// Session settings
    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The underlying backend, once authenticated
    #[must_use]
    pub fn api(&self) -> Option<&A> {
        self.api.as_ref()
    }

    fn backend(&self) -> Result<&A, SheetsError> {
        self.api.as_ref().ok_or(SheetsError::NotAuthenticated)
    }

    fn parse_range(&self, range: &str) -> Result<SheetRange, SheetsError> {
        Ok(SheetRange::parse(range, &self.settings.default_worksheet)?)
    }

    /// Look up a worksheet by title
    fn worksheet(&self, title: &str) -> Result<WorksheetInfo, SheetsError> {
        self.backend()?
            .spreadsheet()?
            .worksheets
            .into_iter()
            .find(|ws| ws.title == title)
            .ok_or_else(|| SheetsError::WorksheetNotFound(title.to_string()))
    }

    /// Workbook title, URL and worksheets
    pub fn get_spreadsheet_info(&self) -> Outcome<SpreadsheetInfo> {
        self.backend()
            .and_then(|api| api.spreadsheet())
            .map(|meta| SpreadsheetInfo {
                title: meta.title,
                url: meta.url,
                worksheets: meta.worksheets,
            })
            .into()
    }

    /// All records of the worksheet named in `range`
    ///
    /// Only the worksheet part of `range` is used; the whole worksheet is read
    /// and its first row taken as headers.
    pub fn get_worksheet_data(&self, range: &str) -> Outcome<WorksheetData> {
        let result = (|| -> Result<WorksheetData, SheetsError> {
            let parsed = self.parse_range(range)?;
            let worksheet = self.worksheet(parsed.worksheet())?;
            let values = self.backend()?.read_values(&qualified(&worksheet.title, None))?;
            let (headers, data) = records(values)?;

            Ok(WorksheetData {
                range: range.to_string(),
                row_count: data.len(),
                headers,
                data,
            })
        })();
        result.into()
    }

    /// Raw values of exactly `range`
    pub fn get_range_values(&self, range: &str) -> Outcome<RangeValues> {
        let result = (|| -> Result<RangeValues, SheetsError> {
            let parsed = self.parse_range(range)?;
            let worksheet = self.worksheet(parsed.worksheet())?;
            let values = self
                .backend()?
                .read_values(&qualified(&worksheet.title, parsed.cells()))?;
            Ok(RangeValues {
                range: range.to_string(),
                values,
            })
        })();
        result.into()
    }

    /// Write `value` into the single cell addressed by `range`
    pub fn update_cell(&self, range: &str, value: &str) -> Outcome<CellUpdate> {
        let result = (|| -> Result<CellUpdate, SheetsError> {
            let parsed = self.parse_range(range)?;
            let cell = parsed.cell_address()?;
            let worksheet = self.worksheet(parsed.worksheet())?;

            self.backend()?.write_values(
                &qualified(&worksheet.title, Some(cell)),
                &[vec![Value::String(value.to_string())]],
            )?;
            info!(range = %range, "Updated cell");

            Ok(CellUpdate {
                success: true,
                range: format!("{}!{}", worksheet.title, cell),
                value: value.to_string(),
            })
        })();
        result.into()
    }

    /// Append one row per entry of `rows` after the table found in `range`
    pub fn append_rows(&self, range: &str, rows: &[Vec<String>]) -> Outcome<AppendedRows> {
        let result = (|| -> Result<AppendedRows, SheetsError> {
            let parsed = self.parse_range(range)?;
            let worksheet = self.worksheet(parsed.worksheet())?;
            let cells = parsed.cells().map(|_| parsed.cell_address()).transpose()?;
            let values: Vec<Vec<Value>> = rows
                .iter()
                .map(|row| row.iter().cloned().map(Value::String).collect())
                .collect();

            let written = self
                .backend()?
                .append_values(&qualified(&worksheet.title, cells), &values)?;
            info!(range = %written, rows = rows.len(), "Appended rows");

            Ok(AppendedRows {
                success: true,
                range: written,
                rows: rows.len(),
            })
        })();
        result.into()
    }

    /// Add a worksheet of 1000 rows by 26 columns
    pub fn create_worksheet(&self, title: &str) -> Outcome<CreatedWorksheet> {
        self.backend()
            .and_then(|api| api.add_worksheet(title, NEW_WORKSHEET_ROWS, NEW_WORKSHEET_COLS))
            .map(|ws| {
                info!(title = %ws.title, id = ws.id, "Created worksheet");
                CreatedWorksheet {
                    success: true,
                    title: ws.title,
                    id: ws.id,
                }
            })
            .into()
    }

    /// All worksheets of the workbook
    pub fn list_worksheets(&self) -> Outcome<WorksheetList> {
        self.backend()
            .and_then(|api| api.spreadsheet())
            .map(|meta| WorksheetList {
                worksheets: meta.worksheets,
            })
            .into()
    }
}

/// Split raw rows into headers and header-keyed records
///
/// Short rows are padded with empty strings; cells beyond the header are
/// dropped. Every header, blank ones included, must be unique so that each
/// column keeps its own key.
fn records(
    mut values: Vec<Vec<Value>>,
) -> Result<(Vec<String>, Vec<Map<String, Value>>), SheetsError> {
    if values.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    let header_row = values.remove(0);
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(SheetsError::DuplicateHeader(dup.clone()));
    }

    let data: Vec<Map<String, Value>> = values
        .into_iter()
        .map(|row| {
            let mut cells = row.into_iter();
            headers
                .iter()
                .map(|h| {
                    let cell = cells.next().unwrap_or_else(|| Value::String(String::new()));
                    (h.clone(), cell)
                })
                .collect()
        })
        .collect();

    let headers = if data.is_empty() { Vec::new() } else { headers };
    Ok((headers, data))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
