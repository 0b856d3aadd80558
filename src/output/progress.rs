use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} Checking [{bar:40.cyan/blue}] {pos}/{len} files ({elapsed})";

/// Progress bar for a check run, drawn on stderr.
///
/// Hidden in quiet mode and when stderr is not a TTY. Cloning shares the bar,
/// so workers on different threads can advance it.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
}

impl ScanProgress {
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, quiet, is_tty)
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
                pb.set_style(style.progress_chars("█▓░"));
            }
            pb
        };
        Self { progress_bar }
    }

    /// Advance by one file. Safe to call from rayon workers.
    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
