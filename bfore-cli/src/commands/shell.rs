//! Interactive shell - reads one command per line until `exit` or EOF.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::app::AppContext;
use crate::{Cli, Commands};

/// What one input line asks the shell to do.
#[derive(Debug)]
enum ShellLine {
    Empty,
    Exit,
    Run(Commands),
    Invalid(clap::Error),
}

fn parse_line(line: &str) -> ShellLine {
    let line = line.trim();
    if line.is_empty() {
        return ShellLine::Empty;
    }
    if line == "exit" {
        return ShellLine::Exit;
    }
    match Cli::try_parse_from(std::iter::once("bfore").chain(line.split_whitespace())) {
        Ok(Cli {
            command: Some(command),
            ..
        }) => ShellLine::Run(command),
        Ok(_) => ShellLine::Empty,
        Err(e) => ShellLine::Invalid(e),
    }
}

/// Runs the shell. Command errors are printed and the loop continues.
pub async fn run(app: &AppContext) -> Result<()> {
    println!("{}", app.formatter.banner());

    let stdin = std::io::stdin();
    loop {
        print!("{}", app.formatter.prompt(&app.session()));
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            println!();
            break;
        }

        match parse_line(&line) {
            ShellLine::Empty => {}
            ShellLine::Exit => {
                println!("Bye!");
                break;
            }
            ShellLine::Invalid(e) => {
                // Covers `help` and `--help` too.
                let _ = e.print();
            }
            ShellLine::Run(command) => {
                debug!(?command, "Shell command");
                if let Err(e) = crate::execute(&command, app).await {
                    eprintln!("{}", app.formatter.format_error(&format!("{e:#}")));
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
