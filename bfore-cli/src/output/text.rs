//! Text output formatting with progress bars and colors.

use bfore_core::{DnsRecord, ScoredDomain, Session};
use bfore_fetch::PipelineReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

const RULE: &str = "================================================";

const BANNER: &str = r"
    ▒▒▒▒▒▒▒▒▒▒
    ▒    ▒    ▒    ████    ██                     ██    █
    ▒   ▒ ▒   ▒    █   █ ████  ███   █ ██ ████    ███   █
    ░ ▒▒    ▒▒     █████  ██  █    █ ██  █    █  █  █   █
    ░░  ▒░▒▒  ▒    █   ██ ██  █    █ ██  █      ██████  █
    ░    ░    ▒    █████  ██   ████  ██   ████  █    ██ █
    ░░░░░░░▒▒▒
";

/// Text formatter with optional colors.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 30,
        }
    }

    /// Set the progress bar width.
    #[allow(dead_code)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// The startup banner.
    pub fn banner(&self) -> String {
        format!(
            "{}\n {} -- Type 'help' for commands, 'exit' to quit.",
            self.cyan(BANNER),
            self.bold("BforeAI CLI")
        )
    }

    /// Shell prompt: `<user>-cli $ ` when logged in, `$ ` otherwise.
    pub fn prompt(&self, session: &Session) -> String {
        if session.is_authenticated() && !session.username.is_empty() {
            format!("{}-cli $ ", session.username)
        } else {
            "$ ".to_string()
        }
    }

    /// Formats sampled domains, one block per domain.
    pub fn format_domains(&self, domains: &[ScoredDomain]) -> String {
        let mut lines = vec![String::new(), self.bold("======= API Results ===============================")];
        for (i, d) in domains.iter().enumerate() {
            lines.push(format!("  Result {}:", i + 1));
            lines.push(format!("  ID:             {}", d.id));
            lines.push(format!("  Name:           {}", self.cyan(&d.name)));
            lines.push(format!("  Score Created:  {}", d.score_created));
            lines.push(format!("  Domain Created: {}", d.domain_created));
            lines.push(format!("  Score:          {:.6}", d.score));
            lines.push(self.dim(RULE));
        }
        lines.join("\n")
    }

    /// Formats DNS records, one block per record.
    pub fn format_records(&self, records: &[DnsRecord]) -> String {
        let mut lines = vec![String::new(), self.bold("--- API Results ---")];
        for (i, r) in records.iter().enumerate() {
            lines.push(format!("Record {}:", i + 1));
            lines.push(format!("  Domain Name: {}", r.domain_name));
            lines.push(format!("  Record Type: {}", r.record_type));
            if !r.address.is_empty() {
                lines.push(format!("  Address:     {}", r.address));
            }
            if !r.server.is_empty() {
                lines.push(format!("  Server:      {}", r.server));
            }
            if !r.texts.is_empty() {
                lines.push(format!("  Texts:       {}", r.texts.join("; ")));
            }
            lines.push(self.dim("-------------------"));
        }
        lines.join("\n")
    }

    /// Summary printed after a sampling run.
    pub fn format_sample_summary(&self, report: &PipelineReport) -> String {
        let mut lines = vec![format!(
            "Finished sample generation. Found {} total domains.",
            report.items.len()
        )];
        if report.is_partial() {
            lines.push(self.yellow(&format!(
                "{} of {} windows failed",
                report.windows_failed(),
                report.windows_total
            )));
        }
        lines.join("\n")
    }

    /// Formats the current session. The token is masked unless `reveal`.
    pub fn format_session(&self, session: &Session, reveal: bool) -> String {
        if !session.is_authenticated() {
            return self.dim("Not logged in.");
        }
        let token = if reveal {
            session.token.clone()
        } else {
            mask_token(&session.token)
        };
        format!(
            "Current User Information: {}\nCurrent Token:            {}",
            self.bold(&session.username),
            token
        )
    }

    /// One progress line: `Fetching data  45% |█████░░░░░| (9/20)`.
    pub fn progress_line(&self, done: usize, total: usize) -> String {
        #[allow(clippy::cast_precision_loss)]
        let fraction = if total == 0 {
            1.0
        } else {
            done.min(total) as f64 / total as f64
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let filled = (fraction * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (fraction * 100.0).round() as u32;
        format!(
            "Fetching data {:>3}% |{}| ({}/{})",
            percent,
            self.green(&bar),
            done,
            total
        )
    }

    /// Formats an error message.
    pub fn format_error(&self, error: &str) -> String {
        format!("{}: {}", self.red("Error"), error)
    }

    /// Formats a success message.
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.green("✓"), message)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Keeps the first and last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
