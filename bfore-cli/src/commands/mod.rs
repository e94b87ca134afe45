//! CLI command implementations.

pub mod auth;
pub mod config;
pub mod domain_info;
pub mod files;
pub mod sample;
pub mod shell;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Prints `label` and reads one trimmed line from stdin.
pub fn prompt_line(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
