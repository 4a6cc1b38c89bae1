//! Progress reporting for CLI

use indicatif::{ProgressBar, ProgressStyle};

/// A spinner shown while a scan pass reads and carves its window. The
/// pipeline works against one in-memory window rather than a byte-by-byte
/// stream, so a determinate bar has nothing meaningful to track against;
/// an indeterminate spinner communicates "working" without implying false
/// precision.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn for_scan() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        bar.set_message("Scanning for recoverable files...");
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Self { bar }
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
