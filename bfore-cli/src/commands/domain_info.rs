//! Domain info command - single-domain report lookup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bfore_fetch::{FetchError, ReportQuery};
use bfore_store::{ExportFormat, export_records};
use chrono::{Duration, Utc};
use clap::Args;
use tracing::debug;

use crate::app::AppContext;

/// Timestamp format suggested for `--start` / `--end`.
const REPORT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Arguments for the domain-info command.
#[derive(Args, Debug)]
pub struct DomainInfoArgs {
    /// Domain to look up.
    #[arg(long, short)]
    pub domain: String,

    /// Include a screenshot.
    #[arg(long)]
    pub screenshot: bool,

    /// Include whois.
    #[arg(long)]
    pub whois: bool,

    /// Include DNS records.
    #[arg(long)]
    pub dns: bool,

    /// Include certificate details.
    #[arg(long)]
    pub certificate: bool,

    /// Start of the report range (ISO-8601). Defaults to now.
    #[arg(long)]
    pub start: Option<String>,

    /// End of the report range (ISO-8601). Defaults to 24 hours from now.
    #[arg(long)]
    pub end: Option<String>,

    /// Base filename to save results to; prints them if omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output file format: json, csv or both.
    #[arg(long, short, default_value = "json")]
    pub format: ExportFormat,
}

impl DomainInfoArgs {
    fn query(&self) -> ReportQuery {
        let now = Utc::now();
        ReportQuery {
            domain: self.domain.trim().to_string(),
            certificate: self.certificate.to_string(),
            whois: self.whois.to_string(),
            dns: self.dns.to_string(),
            screenshot: self.screenshot.to_string(),
            start: self
                .start
                .clone()
                .unwrap_or_else(|| now.format(REPORT_TIME_FORMAT).to_string()),
            end: self
                .end
                .clone()
                .unwrap_or_else(|| (now + Duration::hours(24)).format(REPORT_TIME_FORMAT).to_string()),
        }
    }
}

/// Runs the domain-info command.
pub async fn run(args: &DomainInfoArgs, app: &AppContext) -> Result<()> {
    let session = app.session();
    if !session.is_authenticated() {
        return Err(FetchError::NotAuthenticated)
            .context("No API token stored, please login again to store your token");
    }

    let ctx = app.fetch_context(app.fetch_settings(None, None))?;
    let query = args.query();
    let url = ctx.api.report_list_url(&query)?;
    debug!(url = %url, "Requesting domain report");

    let report = ctx
        .api
        .report_list(&session, &query)
        .await
        .context("API request failed")?;
    let records = report.records();

    println!(
        "Successfully retrieved {} total records from {} report(s).",
        records.len(),
        report.reports.len()
    );
    if records.is_empty() {
        return Ok(());
    }

    match &args.output {
        Some(base) => {
            let written = export_records(&records, base, args.format)
                .with_context(|| format!("Failed to save results to {}", base.display()))?;
            for path in written {
                println!("Successfully saved data to {}", path.display());
            }
        }
        None => println!("{}", app.formatter.format_records(&records)),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
