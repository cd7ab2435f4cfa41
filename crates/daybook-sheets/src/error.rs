// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for daybook-sheets

use thiserror::Error;

use crate::range::RangeError;

/// Errors raised while talking to the Sheets API
///
/// These stay inside the crate boundary; [`crate::SheetsClient`] reports them
/// to callers as the `error` string of an [`crate::Outcome`].
#[derive(Debug, Error)]
pub enum SheetsError {
    /// An operation was attempted before `authenticate()` succeeded
    #[error("Not authenticated. Call authenticate() first")]
    NotAuthenticated,

    /// No service-account credentials were supplied
    #[error("GOOGLE_SERVICE_ACCOUNT_JSON not found in environment")]
    MissingCredentials,

    /// The credential payload is not a usable service-account object
    #[error("Error parsing service account JSON: {0}")]
    InvalidCredentials(String),

    /// The signed assertion could not be produced
    #[error("Failed to sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// A response body did not have the expected shape
    #[error("Unexpected API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No worksheet with the given title exists in the workbook
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// The header row repeats a column name
    #[error("The header row in the worksheet is not unique: '{0}'")]
    DuplicateHeader(String),

    /// The caller-supplied range is malformed
    #[error(transparent)]
    Range(#[from] RangeError),
}
