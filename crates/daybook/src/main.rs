// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! daybook: daily work notes from git history
//!
//! `analyze` reads commit history across local repositories and writes a
//! per-day narrative document. `sheets` exposes spreadsheet operations as
//! JSON commands. `sync` writes the narratives into spreadsheet rows.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use daybook::analyzer::HistoryAnalyzer;
use daybook::commands::{CommandContext, run_sheets_command};
use daybook::config::{
    AnalysisOptions, AnalyzeArgs, Command, Config, SheetOptions, SheetsArgs, SyncArgs,
};
use daybook::sync::SyncTarget;
use daybook::workflow::{AnalysisSummary, SyncPlan, run_analysis};
use daybook_git::parser::repo_name;
use daybook_sheets::{ClientSettings, SheetsClient};
use tracing::{error, info};

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    match config.command {
        Command::Analyze(args) => analyze(&args),
        Command::Sheets(args) => sheets(&args),
        Command::Sync(args) => sync(&args),
    }
}

fn analyze(args: &AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let options = &args.analysis;
    let repos = discover(options)?;
    if args.discover {
        return Ok(ExitCode::SUCCESS);
    }

    let summary = run_analysis(&HistoryAnalyzer::new(), options, &repos)?;
    print_summary(&summary);
    Ok(ExitCode::SUCCESS)
}

fn discover(options: &AnalysisOptions) -> anyhow::Result<Vec<std::path::PathBuf>> {
    let root = options
        .repos_dir()
        .context("No repositories directory given")?;

    println!("📅 Date range: {} to {}", options.start_date, options.end_date);
    println!("📁 Repositories directory: {}", root.display());

    let repos = HistoryAnalyzer::discover(&root, &options.patterns);
    for repo in &repos {
        println!("  📁 Found: {}", repo_name(repo));
    }
    println!("📊 Discovered {} repositories", repos.len());
    Ok(repos)
}

fn print_summary(summary: &AnalysisSummary) {
    let metadata = &summary.document.metadata;

    for failure in &metadata.failed_repos {
        println!("⚠️  Could not read {}: {}", failure.repo, failure.reason);
    }

    let Some(path) = &summary.saved_to else {
        println!("❌ No commits found in the specified date range");
        return;
    };

    println!("💾 Analysis saved to: {}", path.display());
    println!();
    println!("📈 Summary:");
    println!("   • Repositories scanned: {}", summary.repos_scanned);
    println!("   • Total commits: {}", metadata.total_commits);
    println!("   • Active repositories: {}", metadata.total_repos);
    println!("   • Active days: {}", metadata.active_days);
    println!("   • Failed repositories: {}", metadata.failed_repos.len());
    println!();
    println!("🎯 Most active days:");
    for day in &summary.most_active {
        println!("   • {}: {} commits", day.date, day.commits);
    }
}

/// Authenticate against the configured workbook
fn connect(sheet: &SheetOptions, default_worksheet: &str) -> anyhow::Result<Option<SheetsClient>> {
    let credentials = sheet.credentials_json()?;
    let settings =
        ClientSettings::new(sheet.sheet_id()).with_default_worksheet(default_worksheet);

    let mut client = SheetsClient::new(settings);
    if client.authenticate(credentials.as_deref()) {
        Ok(Some(client))
    } else {
        Ok(None)
    }
}

fn sheets(args: &SheetsArgs) -> anyhow::Result<ExitCode> {
    let Some(client) = connect(&args.sheet, &args.default_worksheet)? else {
        return Ok(ExitCode::FAILURE);
    };

    let context = CommandContext {
        default_worksheet: args.default_worksheet.clone(),
        notes_column: args.notes_column.to_uppercase(),
    };

    match run_sheets_command(&client, &context, &args.command, &args.args) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(usage) = e.usage() {
                eprintln!("Usage: {usage}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn sync(args: &SyncArgs) -> anyhow::Result<ExitCode> {
    if args.refresh {
        let repos = discover(&args.analysis)?;
        let summary = run_analysis(&HistoryAnalyzer::new(), &args.analysis, &repos)?;
        print_summary(&summary);
    }

    let rows = args.rows.as_deref().context("No row mapping given")?;
    let plan = match SyncPlan::load(&args.analysis.output, rows) {
        Ok(plan) => plan,
        Err(e) => {
            error!(error = %e, "Cannot sync");
            return Ok(ExitCode::FAILURE);
        }
    };

    let metadata = &plan.document.metadata;
    info!(
        commits = metadata.total_commits,
        repos = metadata.total_repos,
        days = metadata.active_days,
        "Loaded analysis"
    );

    let Some(client) = connect(&args.sheet, &args.worksheet)? else {
        eprintln!("❌ Failed to authenticate with Google Sheets");
        return Ok(ExitCode::FAILURE);
    };

    let target = SyncTarget {
        worksheet: args.worksheet.clone(),
        column: args.column.to_uppercase(),
    };
    let report = plan.execute(&client, &target);

    for date in &report.skipped {
        println!("⚠️  No data for {date}");
    }
    for failure in &report.failed {
        println!("❌ Error updating {}: {}", failure.date, failure.error);
    }
    println!(
        "📊 Successfully updated {}/{} days",
        report.updated, report.total
    );
    Ok(ExitCode::SUCCESS)
}
