// src/report.rs

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::cli::Args;
use crate::error::ReportError;
use crate::fetch::VisitorClient;
use crate::reference::{load_reference, ReferenceColumns, ZoneReference};
use crate::table::{build_visitors_table, missing_zones, write_table, Metric};

/// Everything one report run needs, detached from the command line.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub reference_file: PathBuf,
    pub columns: ReferenceColumns,
    pub api_host: String,
    pub date: String,
    pub metric: Metric,
    pub timeout: Duration,
    pub color: bool,
}

impl From<&Args> for ReportOptions {
    fn from(args: &Args) -> Self {
        Self {
            reference_file: args.reference_file.clone(),
            columns: ReferenceColumns::default(),
            api_host: args.api_host.clone(),
            date: args.date.clone(),
            metric: args.metric,
            timeout: args.timeout(),
            color: args.color.enabled(),
        }
    }
}

/// Load the reference, fetch the day's counts, and write the table to `out`.
/// Nothing is written unless the table was built.
pub async fn run<W: Write + Send>(opts: &ReportOptions, out: &mut W) -> Result<(), ReportError> {
    // ─── 1) load zone reference ──────────────────────────────────────
    let reference = load_reference(&opts.reference_file, &opts.columns)?;

    // ─── 2) connect ──────────────────────────────────────────────────
    let client = VisitorClient::new(opts.api_host.as_str(), opts.timeout)?;

    report(&reference, &client, opts, out).await
}

/// Fetch, pivot and print for an already loaded reference.
pub async fn report<W: Write + Send>(
    reference: &ZoneReference,
    client: &VisitorClient,
    opts: &ReportOptions,
    out: &mut W,
) -> Result<(), ReportError> {
    // ─── 3) fetch half-hour counts ───────────────────────────────────
    let visitors = client
        .fetch_visitors(&opts.date, &reference.guids())
        .await?;

    let missing = missing_zones(reference, &visitors);
    if !missing.is_empty() {
        warn!(
            "zones {:?} are missing from the reference, showing raw GUIDs",
            missing
        );
    }

    // ─── 4) pivot & print ────────────────────────────────────────────
    let table = build_visitors_table(reference, &visitors, opts.metric)?;
    info!(
        rows = table.rows.len(),
        columns = table.column_count(),
        "table built"
    );
    write_table(out, &table, opts.color)?;
    out.flush()?;
    Ok(())
}
