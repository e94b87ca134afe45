// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! bfore - BforeAI PreCrime scoring from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Interactive shell (default)
//! bfore
//!
//! # Authenticate and store the token in the keychain
//! bfore login --username alice
//!
//! # Sample a day of scored domains in 30 minute windows
//! bfore generate-sample --count 100 --min-score 0.75 \
//!     --start 2024-01-01T00:00:00 --end 2024-01-02T00:00:00 \
//!     --output sample --format both
//!
//! # DNS records for one domain
//! bfore domain-info --domain example.com --dns
//! ```

mod app;
mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use bfore_fetch::{FetchError, PipelineError};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::AppContext;
use commands::{auth, config, domain_info, files, sample, shell};

// ============================================================================
// CLI Definition
// ============================================================================

/// bfore - BforeAI PreCrime scoring CLI.
#[derive(Parser)]
#[command(name = "bfore")]
#[command(about = "BforeAI PreCrime scoring CLI")]
#[command(long_about = r"
bfore talks to the BforeAI API: it logs in, looks up domain reports and
samples PreCrime-scored domains over a time range.

Examples:
  bfore                                   # Interactive shell
  bfore login                             # Prompt for credentials
  bfore show                              # Who am I?
  bfore sample --count 100 --min-score 0.75 \
      --start 2024-01-01T00:00:00 --end 2024-01-01T12:00:00
  bfore config show                       # Effective configuration
")]
#[command(version)]
#[command(author = "bfore contributors")]
pub struct Cli {
    /// Subcommand to run. If none, starts the interactive shell.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logs, no progress bar).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file to use instead of the default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API base URL, overriding the configuration file.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with your BforeAI username and password.
    Login(auth::LoginArgs),

    /// Forget the stored session.
    Logout,

    /// Show the authenticated user.
    Show(auth::ShowArgs),

    /// Clear the terminal screen.
    Clear,

    /// Print a local .json or .csv file.
    Read(files::ReadArgs),

    /// Get detailed information about a domain.
    DomainInfo(domain_info::DomainInfoArgs),

    /// Sample scored domains over a time range.
    #[command(visible_alias = "sample")]
    GenerateSample(sample::SampleArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),

    /// Start the interactive shell.
    Shell,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The command needs a session and none is stored.
    NotLoggedIn = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        let not_logged_in = error.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<PipelineError>(),
                Some(PipelineError::NotAuthenticated)
            ) || matches!(
                cause.downcast_ref::<FetchError>(),
                Some(FetchError::NotAuthenticated)
            )
        });
        if not_logged_in {
            Self::NotLoggedIn
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("bfore=debug,info")
    } else {
        EnvFilter::new("bfore=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match AppContext::from_cli(&cli) {
        Ok(app) => match &cli.command {
            None | Some(Commands::Shell) => shell::run(&app).await,
            Some(command) => execute(command, &app).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}

/// Runs one command. The shell calls this for every line it reads.
pub async fn execute(command: &Commands, app: &AppContext) -> Result<()> {
    match command {
        Commands::Login(args) => auth::login(args, app).await,
        Commands::Logout => auth::logout(app),
        Commands::Show(args) => auth::show(args, app),
        Commands::Clear => files::clear(),
        Commands::Read(args) => files::read(args, app),
        Commands::DomainInfo(args) => domain_info::run(args, app).await,
        Commands::GenerateSample(args) => sample::run(args, app).await,
        Commands::Config(args) => config::run(args, app),
        Commands::Shell => {
            println!("Already in the interactive shell.");
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sample_alias() {
        let cli = Cli::try_parse_from([
            "bfore",
            "sample",
            "--count",
            "10",
            "--min-score",
            "0.5",
            "--start",
            "2024-01-01T00:00:00",
            "--end",
            "2024-01-01T01:00:00",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::GenerateSample(_))));
    }

    #[test]
    fn test_no_command_means_shell() {
        let cli = Cli::try_parse_from(["bfore", "--no-color"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.no_color);
    }

    #[test]
    fn test_exit_code_for_missing_session() {
        let err = anyhow::Error::new(PipelineError::NotAuthenticated).context("sampling");
        assert!(matches!(ExitCode::for_error(&err), ExitCode::NotLoggedIn));

        let err = anyhow::Error::new(FetchError::NotAuthenticated);
        assert!(matches!(ExitCode::for_error(&err), ExitCode::NotLoggedIn));

        let err = anyhow::anyhow!("something else");
        assert!(matches!(ExitCode::for_error(&err), ExitCode::Error));
    }
}
