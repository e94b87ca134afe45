//! Local file commands: read, clear.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bfore_fetch::FetchError;
use clap::Args;

use crate::app::AppContext;

/// Arguments for the read command.
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// File to print.
    pub file: PathBuf,
}

/// Runs the read command. Requires a session.
pub fn read(args: &ReadArgs, app: &AppContext) -> Result<()> {
    if !app.session().is_authenticated() {
        return Err(FetchError::NotAuthenticated)
            .context("You must be authenticated to read the file system");
    }

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Error reading file '{}'", args.file.display()))?;

    let name = args.file.display();
    println!("\n--- Content of {name} ---");
    println!("{}", render(&args.file, &content));
    println!("--- End of {name} ---");
    Ok(())
}

/// JSON files are pretty-printed when they parse; anything else is printed
/// as is.
fn render(path: &Path, content: &str) -> String {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(content) {
            if let Ok(pretty) = serde_json::to_string_pretty(&value) {
                return pretty;
            }
        }
    }
    content.to_string()
}

/// Runs the clear command.
pub fn clear() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\x1b[2J\x1b[H")?;
    stdout.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pretty_prints_json() {
        let out = render(Path::new("data.json"), r#"{"Domains":[{"Id":1}]}"#);
        assert_eq!(out, "{\n  \"Domains\": [\n    {\n      \"Id\": 1\n    }\n  ]\n}");
    }

    #[test]
    fn test_render_keeps_invalid_json() {
        assert_eq!(render(Path::new("data.json"), "{not json"), "{not json");
    }

    #[test]
    fn test_render_csv_as_is() {
        let csv = "ID,Name\n1,a.com\n";
        assert_eq!(render(Path::new("data.CSV"), csv), csv);
    }
}
