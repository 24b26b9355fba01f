//! `plotmerge upsert` — sync page metadata JSON into SQLite.

use std::path::PathBuf;

use plotmerge_merge::engine::read_input;
use plotmerge_store::{open, parse_pages, upsert_pages, UpsertSummary};
use serde::Serialize;
use tracing::info;

use crate::CliError;

#[derive(Serialize)]
struct UpsertReport {
    #[serde(flatten)]
    summary: UpsertSummary,
    skipped: usize,
}

pub fn cmd_upsert(input: PathBuf, db: PathBuf, json: bool) -> Result<(), CliError> {
    let data = read_input(&input)?;
    let parsed = parse_pages(&data).map_err(|e| {
        let mut err = CliError::from(e);
        err.message = format!("{}: {}", input.display(), err.message);
        err
    })?;

    let mut conn = open(&db)?;
    info!(db = %db.display(), pages = parsed.pages.len(), "database opened");
    let summary = upsert_pages(&mut conn, &parsed.pages)?;

    let report = UpsertReport { summary, skipped: parsed.skipped };

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{text}");
    } else {
        println!(
            "Database update/insert complete. {} inserted, {} updated, {} skipped.",
            report.summary.inserted, report.summary.updated, report.skipped
        );
    }

    Ok(())
}
