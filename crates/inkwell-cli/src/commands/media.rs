//! Media maintenance commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use inkwell_core::config::DatabaseProvider;
use inkwell_core::error::AppError;
use inkwell_service::media::{AuditReport, MediaAuditService};

/// Arguments for the media command
#[derive(Debug, Args)]
pub struct MediaArgs {
    /// Media subcommand
    #[command(subcommand)]
    pub command: MediaCommand,
}

/// Media subcommands
#[derive(Debug, Subcommand)]
pub enum MediaCommand {
    /// Find media files nothing references and delete them
    Audit {
        /// List what would be deleted without touching the disk
        #[arg(long)]
        dry_run: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// One orphan candidate and what happened to it
#[derive(Debug, Serialize, Tabled)]
struct CandidateRow {
    /// Path relative to the media root
    path: String,
    /// Outcome
    status: String,
}

/// Execute media commands
pub async fn execute(
    args: &MediaArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        MediaCommand::Audit { dry_run, yes } => audit(config_path, format, *dry_run, *yes).await,
    }
}

async fn audit(
    config_path: &str,
    format: OutputFormat,
    dry_run: bool,
    yes: bool,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    if !dry_run && config.database.provider == DatabaseProvider::Memory {
        return Err(AppError::configuration(
            "Refusing to purge against the memory backend: it holds no references",
        ));
    }

    let stores = super::create_stores(&config).await?;
    let service = MediaAuditService::new(stores.media_references, Arc::new(config.media));

    if !dry_run && !yes {
        let scan = service.find_orphans().await?;
        if scan.orphans.is_empty() {
            output::print_success("No orphaned media files found.");
            return Ok(());
        }
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete {} orphaned file(s) under '{}'?",
                scan.orphans.len(),
                service.media_root().display()
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = service.run(dry_run).await?;
    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => print_report(&report),
    }
    Ok(())
}

fn candidate_rows(report: &AuditReport) -> Vec<CandidateRow> {
    report
        .orphans
        .iter()
        .map(|path| {
            let status = if report.purge.dry_run {
                "would delete".to_string()
            } else if let Some((_, reason)) = report.purge.failed.iter().find(|(p, _)| p == path) {
                format!("failed: {reason}")
            } else {
                "deleted".to_string()
            };
            CandidateRow {
                path: path.clone(),
                status,
            }
        })
        .collect()
}

fn print_report(report: &AuditReport) {
    output::print_table(&candidate_rows(report));
    println!();
    output::print_kv("Referenced", &report.referenced.to_string());
    output::print_kv("On disk", &report.on_disk.to_string());
    output::print_kv("Orphans", &report.orphans.len().to_string());

    if report.purge.dry_run {
        output::print_warning("Dry run: nothing was deleted.");
        return;
    }

    output::print_kv("Deleted", &report.purge.deleted.len().to_string());
    output::print_kv("Failed", &report.purge.failed.len().to_string());
    output::print_kv(
        "Directories removed",
        &report.purge.removed_directories.len().to_string(),
    );
    if report.purge.failed.is_empty() {
        output::print_success("Media audit complete.");
    } else {
        output::print_warning("Some files could not be deleted.");
    }
}
