//! Output formatting for CLI.

mod progress;
mod text;

pub use progress::TerminalProgress;
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
