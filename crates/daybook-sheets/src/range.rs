// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! A1-notation range parsing
//!
//! Ranges have the shape `[worksheet!]cells`. The worksheet name may be
//! single-quoted (`'My Sheet'!B2`, with `''` for a literal quote). Without a
//! `!` the whole input is taken as the cell part of the default worksheet.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static CELLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{1,3}[1-9][0-9]{0,6}(:[A-Za-z]{1,3}[1-9][0-9]{0,6})?$")
        .expect("valid A1 regex")
});

static COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,3}$").expect("valid column regex"));

/// Malformed range input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// `!` with nothing before it
    #[error("Invalid range '{0}': worksheet name is empty")]
    EmptyWorksheet(String),

    /// More than one unquoted `!`
    #[error("Invalid range '{0}': expected at most one '!' separator")]
    MultipleSeparators(String),

    /// A quoted worksheet name without its closing quote
    #[error("Invalid range '{0}': unterminated quoted worksheet name")]
    UnterminatedQuote(String),

    /// The cell part is not `A1` or `A1:B2`
    #[error("Invalid range '{0}': cell address must look like A1 or A1:B2")]
    InvalidCells(String),

    /// A cell address is required but the range names only a worksheet
    #[error("Invalid range '{0}': missing cell address")]
    MissingCells(String),
}

/// A parsed `[worksheet!]cells` range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    input: String,
    worksheet: String,
    cells: Option<String>,
}

impl SheetRange {
    /// Parse a range, falling back to `default_worksheet` when no worksheet
    /// is named
    ///
    /// The cell part is not validated here; see [`SheetRange::cell_address`].
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] for an empty or unterminated worksheet name, or
    /// for more than one separator.
    pub fn parse(input: &str, default_worksheet: &str) -> Result<Self, RangeError> {
        let (worksheet, cells) = if let Some(quoted) = input.strip_prefix('\'') {
            let (name, after) = split_quoted(quoted)
                .ok_or_else(|| RangeError::UnterminatedQuote(input.to_string()))?;
            match after.strip_prefix('!') {
                Some(cells) => (name, Some(cells)),
                None if after.is_empty() => (name, None),
                None => return Err(RangeError::InvalidCells(input.to_string())),
            }
        } else {
            match input.split_once('!') {
                Some((name, cells)) => (name.to_string(), Some(cells)),
                None => (default_worksheet.to_string(), Some(input)),
            }
        };

        if worksheet.is_empty() {
            return Err(RangeError::EmptyWorksheet(input.to_string()));
        }
        if cells.is_some_and(|c| c.contains('!')) {
            return Err(RangeError::MultipleSeparators(input.to_string()));
        }

        Ok(Self {
            input: input.to_string(),
            worksheet,
            cells: cells.filter(|c| !c.is_empty()).map(str::to_string),
        })
    }

    /// Worksheet the range refers to
    #[must_use]
    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// Raw cell part, if any
    #[must_use]
    pub fn cells(&self) -> Option<&str> {
        self.cells.as_deref()
    }

    /// The cell part, validated as `A1` or `A1:B2`
    ///
    /// # Errors
    ///
    /// Returns `MissingCells` or `InvalidCells` when no usable address exists.
    pub fn cell_address(&self) -> Result<&str, RangeError> {
        let cells = self
            .cells
            .as_deref()
            .ok_or_else(|| RangeError::MissingCells(self.input.clone()))?;
        if is_a1(cells) {
            Ok(cells)
        } else {
            Err(RangeError::InvalidCells(self.input.clone()))
        }
    }
}

/// Whether `cells` is an A1 cell or a rectangular A1 range
#[must_use]
pub fn is_a1(cells: &str) -> bool {
    CELLS.is_match(cells)
}

/// Whether `column` is a column letter sequence such as `C` or `AB`
#[must_use]
pub fn is_column(column: &str) -> bool {
    COLUMN.is_match(column)
}

/// Quote a worksheet title for use inside an A1 range
#[must_use]
pub fn quote_worksheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// A1 range addressing `cells` (or the whole sheet) on `title`
#[must_use]
pub fn qualified(title: &str, cells: Option<&str>) -> String {
    match cells {
        Some(cells) => format!("{}!{}", quote_worksheet(title), cells),
        None => quote_worksheet(title),
    }
}

/// `Title!cells`, quoting the title only when it is not a plain identifier
#[must_use]
pub fn sheet_range(title: &str, cells: &str) -> String {
    let plain = !title.is_empty() && title.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        format!("{title}!{cells}")
    } else {
        format!("{}!{}", quote_worksheet(title), cells)
    }
}

/// Read a quoted name up to its closing quote, returning the unescaped name
/// and whatever follows the quote
fn split_quoted(rest: &str) -> Option<(String, &str)> {
    let mut name = String::new();
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\'' {
            if let Some(&(_, '\'')) = chars.peek() {
                name.push('\'');
                chars.next();
                continue;
            }
            return Some((name, &rest[i + 1..]));
        }
        name.push(c);
    }
    None
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing never panics
        #[test]
        fn prop_parse_never_panics(input in ".*") {
            let _ = SheetRange::parse(&input, "Sheet1");
        }

        /// Property: quoting a title and parsing it back yields the title
        #[test]
        fn prop_quoted_title_roundtrip(title in "[^\u{0}]{1,30}", row in 1u32..5000) {
            let input = qualified(&title, Some(&format!("B{row}")));
            let range = SheetRange::parse(&input, "Sheet1").expect("should parse");
            prop_assert_eq!(range.worksheet(), title.as_str());
            let expected = format!("B{row}");
            prop_assert_eq!(range.cell_address().expect("valid cell"), expected.as_str());
        }
    }
}
