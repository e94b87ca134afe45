//! Terminal progress bar for the windowed fetch.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use bfore_fetch::ProgressReporter;

use super::TextFormatter;

/// Redraws a one-line bar on stderr after every tick.
pub struct TerminalProgress {
    formatter: TextFormatter,
    total: AtomicUsize,
    done: AtomicUsize,
}

impl TerminalProgress {
    /// Creates a bar drawn with `formatter`.
    pub fn new(formatter: TextFormatter) -> Self {
        Self {
            formatter,
            total: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        }
    }

    fn draw(&self, done: usize) {
        let total = self.total.load(Ordering::Acquire);
        let line = self.formatter.progress_line(done, total);
        let mut stderr = std::io::stderr().lock();
        // Best effort.
        let _ = write!(stderr, "\r{line}");
        if done >= total {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

impl ProgressReporter for TerminalProgress {
    fn init(&self, total: usize) {
        self.total.store(total, Ordering::Release);
        self.done.store(0, Ordering::Release);
        if total > 0 {
            self.draw(0);
        }
    }

    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::AcqRel) + 1;
        self.draw(done);
    }
}
