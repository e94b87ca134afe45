//! Generate-sample command - windowed sampling of scored domains.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bfore_core::parse_timestamp;
use bfore_fetch::{NoProgress, PipelineError, ProgressReporter, SampleQuery};
use bfore_store::{ExportFormat, export_domains};
use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::output::TerminalProgress;

/// Arguments for the generate-sample command.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// How many records per request the API should return.
    #[arg(long, short)]
    pub count: u32,

    /// Minimum PreCrime score.
    #[arg(long, short = 'm')]
    pub min_score: f64,

    /// Start of the range, YYYY-MM-DDTHH:MM:00.
    #[arg(long, short)]
    pub start: String,

    /// End of the range, YYYY-MM-DDTHH:MM:00.
    #[arg(long, short)]
    pub end: String,

    /// Window width in minutes, overriding the configuration.
    #[arg(long, short)]
    pub window_minutes: Option<i64>,

    /// Maximum concurrent requests (0 = one per window), overriding the
    /// configuration.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Base filename to save results to; prints them if omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output file format: json, csv or both.
    #[arg(long, short, default_value = "json")]
    pub format: ExportFormat,
}

/// Runs the generate-sample command.
pub async fn run(args: &SampleArgs, app: &AppContext) -> Result<()> {
    let session = app.session();
    if !session.is_authenticated() {
        return Err(PipelineError::NotAuthenticated.into());
    }

    let start = parse_timestamp(&args.start)
        .context("Invalid start time format. Please use YYYY-MM-DDTHH:MM:00")?;
    let end = parse_timestamp(&args.end)
        .context("Invalid end time format. Please use YYYY-MM-DDTHH:MM:00")?;
    let settings = app.fetch_settings(args.window_minutes, args.concurrency);
    let width = settings
        .window_width()
        .with_context(|| format!("Invalid --window-minutes {}", settings.window_minutes))?;
    let ctx = app.fetch_context(settings)?;

    let progress: Arc<dyn ProgressReporter> = if app.quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(TerminalProgress::new(app.formatter.clone()))
    };

    println!("\nStarting sample generation...");
    let report = ctx
        .sample_pipeline(progress)
        .run_range(start, end, width, &session, &SampleQuery::new(args.count, args.min_score))
        .await?;

    println!("\n{}", app.formatter.format_sample_summary(&report));
    info!(
        items = report.items.len(),
        failed = report.windows_failed(),
        "Sample generated"
    );
    if report.items.is_empty() {
        return Ok(());
    }
    println!("All domains sorted by score creation date.");

    match &args.output {
        Some(base) => {
            let written = export_domains(&report.items, base, args.format)
                .with_context(|| format!("Failed to save results to {}", base.display()))?;
            for path in written {
                println!("Successfully saved data to {}", path.display());
            }
        }
        None => println!("{}", app.formatter.format_domains(&report.items)),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
