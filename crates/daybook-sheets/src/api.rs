// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Sheets v4 REST access
//!
//! [`SheetsApi`] is the seam between the error-as-data client and the
//! network. [`HttpSheetsApi`] implements it with blocking `ureq` calls
//! authorized by a service-account access token.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;
use ureq::Agent;

use crate::credentials::{SPREADSHEETS_SCOPE, ServiceAccount};
use crate::error::SheetsError;

/// Base URL of the Sheets v4 API
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const TIMEOUT: Duration = Duration::from_secs(30);
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Workbook metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetMeta {
    /// Workbook title
    pub title: String,
    /// Browser URL of the workbook
    pub url: String,
    /// Worksheets in tab order
    pub worksheets: Vec<WorksheetInfo>,
}

/// One worksheet (tab) of a workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorksheetInfo {
    /// Tab title
    pub title: String,
    /// Numeric sheet id
    pub id: i64,
    /// Grid row count
    pub row_count: u32,
    /// Grid column count
    pub col_count: u32,
}

/// Operations the client needs from a spreadsheet backend
pub trait SheetsApi {
    /// Fetch workbook metadata
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` when the backend call fails.
    fn spreadsheet(&self) -> Result<SpreadsheetMeta, SheetsError>;

    /// Read the values of an A1 range, row-major, unformatted
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` when the backend call fails.
    fn read_values(&self, range: &str) -> Result<Vec<Vec<Value>>, SheetsError>;

    /// Overwrite an A1 range with raw values
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` when the backend call fails.
    fn write_values(&self, range: &str, values: &[Vec<Value>]) -> Result<(), SheetsError>;

    /// Append rows after the table found in an A1 range, returning the range
    /// that was written
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` when the backend call fails.
    fn append_values(&self, range: &str, values: &[Vec<Value>]) -> Result<String, SheetsError>;

    /// Add a worksheet with the given grid size
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` when the backend call fails.
    fn add_worksheet(&self, title: &str, rows: u32, cols: u32)
    -> Result<WorksheetInfo, SheetsError>;
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetResponse {
    #[serde(default)]
    spreadsheet_url: String,
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
    #[serde(default)]
    grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: u32,
    #[serde(default)]
    column_count: u32,
}

impl From<SheetProperties> for WorksheetInfo {
    fn from(props: SheetProperties) -> Self {
        Self {
            title: props.title,
            id: props.sheet_id,
            row_count: props.grid_properties.row_count,
            col_count: props.grid_properties.column_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    #[serde(default)]
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    #[serde(default)]
    updated_range: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Reply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    add_sheet: Option<SheetEntry>,
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// Sheets API over HTTPS for one workbook
pub struct HttpSheetsApi {
    agent: Agent,
    access_token: String,
    spreadsheet_id: String,
}

impl std::fmt::Debug for HttpSheetsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSheetsApi")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .finish_non_exhaustive()
    }
}

impl HttpSheetsApi {
    /// Exchange the service-account assertion for an access token
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` if signing, the token request, or decoding fails.
    pub fn connect(
        account: &ServiceAccount,
        spreadsheet_id: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .http_status_as_error(false)
            .build()
            .new_agent();

        let assertion = account.assertion(SPREADSHEETS_SCOPE, Utc::now().timestamp())?;
        debug!(client_email = %account.client_email, "Requesting access token");

        let response = agent
            .post(&account.token_uri)
            .send_form([
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])?;
        let token: TokenResponse = read_json(response)?;

        Ok(Self {
            agent,
            access_token: token.access_token,
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    fn workbook_url(&self) -> String {
        format!("{SHEETS_API_BASE}/{}", encode_path(&self.spreadsheet_id))
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/values/{}", self.workbook_url(), encode_path(range))
    }
}

impl SheetsApi for HttpSheetsApi {
    fn spreadsheet(&self) -> Result<SpreadsheetMeta, SheetsError> {
        let response = self
            .agent
            .get(&self.workbook_url())
            .header("Authorization", &self.bearer())
            .query(
                "fields",
                "spreadsheetUrl,properties.title,sheets.properties",
            )
            .call()?;
        let body: SpreadsheetResponse = read_json(response)?;

        Ok(SpreadsheetMeta {
            title: body.properties.title,
            url: body.spreadsheet_url,
            worksheets: body
                .sheets
                .into_iter()
                .map(|sheet| sheet.properties.into())
                .collect(),
        })
    }

    fn read_values(&self, range: &str) -> Result<Vec<Vec<Value>>, SheetsError> {
        debug!(range = %range, "Reading values");
        let response = self
            .agent
            .get(&self.values_url(range))
            .header("Authorization", &self.bearer())
            .query("majorDimension", "ROWS")
            .query("valueRenderOption", "UNFORMATTED_VALUE")
            .call()?;
        let body: ValueRangeResponse = read_json(response)?;
        Ok(body.values)
    }

    fn write_values(&self, range: &str, values: &[Vec<Value>]) -> Result<(), SheetsError> {
        debug!(range = %range, rows = values.len(), "Writing values");
        let payload = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": values,
        });
        let response = self
            .agent
            .put(&self.values_url(range))
            .header("Authorization", &self.bearer())
            .header("Content-Type", "application/json")
            .query("valueInputOption", "RAW")
            .send(payload.to_string())?;
        let _: Value = read_json(response)?;
        Ok(())
    }

    fn append_values(&self, range: &str, values: &[Vec<Value>]) -> Result<String, SheetsError> {
        debug!(range = %range, rows = values.len(), "Appending values");
        let payload = json!({
            "majorDimension": "ROWS",
            "values": values,
        });
        let response = self
            .agent
            .post(&format!("{}:append", self.values_url(range)))
            .header("Authorization", &self.bearer())
            .header("Content-Type", "application/json")
            .query("valueInputOption", "RAW")
            .query("insertDataOption", "INSERT_ROWS")
            .send(payload.to_string())?;
        let body: AppendResponse = read_json(response)?;
        Ok(body
            .updates
            .map(|u| u.updated_range)
            .unwrap_or_else(|| range.to_string()))
    }

    fn add_worksheet(
        &self,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<WorksheetInfo, SheetsError> {
        debug!(title = %title, rows, cols, "Adding worksheet");
        let payload = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": rows, "columnCount": cols }
                    }
                }
            }]
        });
        let response = self
            .agent
            .post(&format!("{}:batchUpdate", self.workbook_url()))
            .header("Authorization", &self.bearer())
            .header("Content-Type", "application/json")
            .send(payload.to_string())?;
        let body: BatchUpdateResponse = read_json(response)?;

        body.replies
            .into_iter()
            .find_map(|reply| reply.add_sheet)
            .map(|sheet| sheet.properties.into())
            .ok_or_else(|| SheetsError::Api {
                status: 200,
                message: "batchUpdate reply did not include the new sheet".to_string(),
            })
    }
}

/// Decode a JSON body, turning non-success statuses into `SheetsError::Api`
fn read_json<T: for<'de> Deserialize<'de>>(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<T, SheetsError> {
    let status = response.status();
    let body = response.body_mut().read_to_string()?;

    if !status.is_success() {
        return Err(SheetsError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Pull the human-readable message out of a Google API error body
#[must_use]
pub fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("error_description"))
                .or_else(|| v.get("error"))
        })
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Percent-encode a URL path segment
#[must_use]
pub fn encode_path(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
