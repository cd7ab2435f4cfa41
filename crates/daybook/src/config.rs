// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the daybook CLI
//!
//! Every input that names a machine-specific location or an account (the
//! repositories directory, the spreadsheet ID, the date-to-row mapping) must be
//! supplied by flag or environment variable; nothing of the kind has a default.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use daybook_git::DateWindow;
use daybook_sheets::range::is_column;

/// First day analyzed when `--start-date` is not given
pub const DEFAULT_START_DATE: &str = "2025-09-30";
/// Last day analyzed when `--end-date` is not given
pub const DEFAULT_END_DATE: &str = "2025-10-09";
/// Analysis document written by `analyze` and read by `sync`
pub const DEFAULT_OUTPUT: &str = "git_analysis.json";

/// Daybook - daily work notes from git history
#[derive(Parser, Debug, Clone)]
#[command(name = "daybook")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so JSON results on stdout stay parseable.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze git history across repositories and write daily notes
    Analyze(AnalyzeArgs),

    /// Run a spreadsheet command and print its JSON result
    ///
    /// Commands: info, get [range], update <range> <value>,
    /// update-notes <row> <notes>, create <title>, list-sheets,
    /// values <range>, append <range> <cell>...
    Sheets(SheetsArgs),

    /// Write daily notes into spreadsheet rows
    ///
    /// Example:
    ///   daybook sync --refresh --repos-dir ~/src --rows rows.json --sheet-id <id>
    Sync(SyncArgs),
}

/// Where to look for commits and where to store the result
#[derive(Args, Debug, Clone)]
pub struct AnalysisOptions {
    /// Directory whose immediate children are candidate repositories
    ///
    /// A leading `~` is expanded to the home directory.
    #[arg(long, env = "DAYBOOK_REPOS_DIR")]
    pub repos_dir: Option<PathBuf>,

    /// Glob matched against repository directory names
    ///
    /// Repeat the flag or pass a comma-separated list. Patterns are applied
    /// in order.
    #[arg(
        short,
        long = "pattern",
        env = "DAYBOOK_REPO_PATTERNS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub patterns: Vec<String>,

    /// First day to analyze (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = DEFAULT_START_DATE)]
    pub start_date: NaiveDate,

    /// Last day to analyze (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = DEFAULT_END_DATE)]
    pub end_date: NaiveDate,

    /// Path of the analysis document
    #[arg(short, long, env = "DAYBOOK_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Arguments of `daybook analyze`
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub analysis: AnalysisOptions,

    /// Only list discovered repositories, do not analyze
    #[arg(long, default_value = "false")]
    pub discover: bool,
}

/// Spreadsheet identity and credentials
#[derive(Args, Debug, Clone)]
pub struct SheetOptions {
    /// Service-account key: the JSON document itself or a path to it
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_JSON", hide_env_values = true)]
    pub credentials: Option<String>,

    /// Spreadsheet ID from the workbook URL
    #[arg(long, env = "GOOGLE_SHEET_ID")]
    pub sheet_id: Option<String>,
}

/// Arguments of `daybook sheets`
#[derive(Args, Debug, Clone)]
pub struct SheetsArgs {
    #[command(flatten)]
    pub sheet: SheetOptions,

    /// Worksheet used by ranges without a `Worksheet!` prefix
    #[arg(long, env = "DAYBOOK_DEFAULT_WORKSHEET", default_value = "Sheet1")]
    pub default_worksheet: String,

    /// Column written by `update-notes`
    #[arg(long, default_value = "B")]
    pub notes_column: String,

    /// Spreadsheet command to run
    pub command: String,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments of `daybook sync`
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    #[command(flatten)]
    pub analysis: AnalysisOptions,

    #[command(flatten)]
    pub sheet: SheetOptions,

    /// JSON object mapping `YYYY-MM-DD` dates to 1-based row numbers
    #[arg(long, env = "DAYBOOK_ROWS")]
    pub rows: Option<PathBuf>,

    /// Worksheet holding the daily rows
    #[arg(long, default_value = "daily")]
    pub worksheet: String,

    /// Column receiving the notes
    #[arg(long, default_value = "C")]
    pub column: String,

    /// Re-run the analysis before syncing
    #[arg(long, default_value = "false")]
    pub refresh: bool,
}

impl Config {
    /// Validate the inputs of the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns the first problem found; see [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            Command::Analyze(args) => args.analysis.validate(),
            Command::Sheets(args) => {
                args.sheet.validate()?;
                validate_column(&args.notes_column)
            }
            Command::Sync(args) => {
                args.sheet.validate()?;
                validate_column(&args.column)?;
                if args.rows.is_none() {
                    return Err(ConfigError::MissingRows);
                }
                if args.refresh {
                    args.analysis.validate()?;
                }
                Ok(())
            }
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

impl AnalysisOptions {
    /// The repositories directory with `~` expanded
    #[must_use]
    pub fn repos_dir(&self) -> Option<PathBuf> {
        self.repos_dir.as_deref().map(expand_home)
    }

    /// The inclusive window to analyze
    #[must_use]
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }

    /// Check the date window and repositories directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the end date precedes the start date
    /// - no repositories directory was given
    /// - the repositories directory is missing or not a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_date < self.start_date {
            return Err(ConfigError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let dir = self.repos_dir().ok_or(ConfigError::MissingReposDir)?;
        if !dir.exists() {
            return Err(ConfigError::ReposDirNotFound(dir));
        }
        if !dir.is_dir() {
            return Err(ConfigError::ReposDirNotDirectory(dir));
        }
        Ok(())
    }
}

impl SheetOptions {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSheetId` when no spreadsheet ID is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.sheet_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::MissingSheetId),
        }
    }

    /// The spreadsheet ID, empty when unset
    #[must_use]
    pub fn sheet_id(&self) -> &str {
        self.sheet_id.as_deref().unwrap_or_default()
    }

    /// Resolve `--credentials` to the service-account JSON text
    ///
    /// A value starting with `{` is taken as the JSON itself; anything else
    /// is read as a file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CredentialsUnreadable` if the key file cannot be
    /// read.
    pub fn credentials_json(&self) -> Result<Option<String>, ConfigError> {
        let Some(raw) = self.credentials.as_deref() else {
            return Ok(None);
        };
        if raw.trim_start().starts_with('{') {
            return Ok(Some(raw.to_string()));
        }
        let path = expand_home(Path::new(raw));
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ConfigError::CredentialsUnreadable(path, e))
    }
}

fn validate_column(column: &str) -> Result<(), ConfigError> {
    if is_column(column) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColumn(column.to_string()))
    }
}

/// Replace a leading `~` with the home directory
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The end date precedes the start date
    #[error("End date {end} is before start date {start}")]
    InvertedDateRange {
        /// Requested first day
        start: NaiveDate,
        /// Requested last day
        end: NaiveDate,
    },

    /// No repositories directory was configured
    #[error("No repositories directory given. Pass --repos-dir or set DAYBOOK_REPOS_DIR")]
    MissingReposDir,

    /// Repositories directory not found
    #[error("Repositories directory not found: {0}")]
    ReposDirNotFound(PathBuf),

    /// Repositories directory is not a directory
    #[error("Repositories path is not a directory: {0}")]
    ReposDirNotDirectory(PathBuf),

    /// No spreadsheet was configured
    #[error("No spreadsheet ID given. Pass --sheet-id or set GOOGLE_SHEET_ID")]
    MissingSheetId,

    /// No date-to-row mapping was configured
    #[error("No row mapping given. Pass --rows or set DAYBOOK_ROWS")]
    MissingRows,

    /// A column flag is not a column letter
    #[error("Invalid column '{0}': expected letters such as C or AB")]
    InvalidColumn(String),

    /// The service-account key file could not be read
    #[error("Failed to read credentials file {0}: {1}")]
    CredentialsUnreadable(PathBuf, std::io::Error),
}
