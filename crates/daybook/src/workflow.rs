// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end steps shared by the `analyze` and `sync` subcommands

use std::path::{Path, PathBuf};

use daybook_sheets::{SheetsApi, SheetsClient};
use tracing::info;

use crate::analyzer::HistoryAnalyzer;
use crate::config::AnalysisOptions;
use crate::daily::{DayActivity, daily_notes, group_by_day, most_active_days};
use crate::store::{AnalysisDocument, StoreError};
use crate::sync::{RowMapping, SyncReport, SyncTarget, sync_notes};

/// Days listed as most active after an analysis
pub const MOST_ACTIVE_DAYS: usize = 3;

/// What an analysis run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// The assembled document
    pub document: AnalysisDocument,
    /// Busiest days, most commits first
    pub most_active: Vec<DayActivity>,
    /// Repositories whose history was read or attempted
    pub repos_scanned: usize,
    /// Where the document was written, if it was
    pub saved_to: Option<PathBuf>,
}

/// Analyze `repos` over the configured window and save the document
///
/// Nothing is written when no commits are found.
///
/// # Errors
///
/// Returns `StoreError` if the document cannot be written.
pub fn run_analysis(
    analyzer: &HistoryAnalyzer,
    options: &AnalysisOptions,
    repos: &[PathBuf],
) -> Result<AnalysisSummary, StoreError> {
    let run = analyzer.analyze_all_repos(repos, &options.window());

    if run.is_empty() {
        info!(
            start = %options.start_date,
            end = %options.end_date,
            "No commits found in the specified date range"
        );
        return Ok(AnalysisSummary {
            document: AnalysisDocument::new(Vec::new(), Default::default(), run.failed_repos),
            most_active: Vec::new(),
            repos_scanned: run.repos_scanned,
            saved_to: None,
        });
    }

    let days = group_by_day(&run.commits);
    let notes = daily_notes(&days);
    let most_active = most_active_days(&days, MOST_ACTIVE_DAYS);
    info!(days = notes.len(), "Generated daily notes");

    let repos_scanned = run.repos_scanned;
    let document = AnalysisDocument::new(run.commits, notes, run.failed_repos);
    document.save(&options.output)?;

    Ok(AnalysisSummary {
        document,
        most_active,
        repos_scanned,
        saved_to: Some(options.output.clone()),
    })
}

/// Inputs loaded for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// The analysis document to publish
    pub document: AnalysisDocument,
    /// Where each date goes
    pub mapping: RowMapping,
}

impl SyncPlan {
    /// Load the analysis document and the row mapping
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either file is missing or malformed.
    pub fn load(analysis: &Path, rows: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            document: AnalysisDocument::load(analysis)?,
            mapping: RowMapping::load(rows)?,
        })
    }

    /// Push the notes through `client`
    pub fn execute<A: SheetsApi>(&self, client: &SheetsClient<A>, target: &SyncTarget) -> SyncReport {
        sync_notes(client, &self.document.daily_notes, &self.mapping, target)
    }
}
