// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! daybook-sheets: Google Sheets access for daybook
//!
//! This library crate authenticates with a service account, opens one
//! workbook, and exposes the handful of operations daybook needs: workbook
//! metadata, reading a worksheet as records, writing a single cell, creating
//! and listing worksheets.
//!
//! Every operation on [`SheetsClient`] returns an [`Outcome`]: either the
//! success payload or `{"error": "..."}`. Callers branch on the error instead
//! of handling a Rust error type.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use daybook_sheets::{ClientSettings, SheetsClient};
//!
//! let mut client = SheetsClient::new(ClientSettings::new("spreadsheet-id"));
//! let credentials = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON").ok();
//! if !client.authenticate(credentials.as_deref()) {
//!     std::process::exit(1);
//! }
//!
//! let result = client.update_cell("daily!C3", "3 commits");
//! if let Some(error) = result.error() {
//!     eprintln!("update failed: {error}");
//! }
//! ```

pub mod api;
pub mod client;
pub mod credentials;
pub mod error;
pub mod range;

pub use api::{HttpSheetsApi, SheetsApi, SpreadsheetMeta, WorksheetInfo};
pub use client::{
    AppendedRows, CellUpdate, ClientSettings, CreatedWorksheet, Outcome, RangeValues,
    SheetsClient, SpreadsheetInfo, WorksheetData, WorksheetList,
};
pub use credentials::ServiceAccount;
pub use error::SheetsError;
pub use range::{RangeError, SheetRange, sheet_range};
