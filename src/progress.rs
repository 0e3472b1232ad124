//! Status and progress display for bundle runs

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a phase heading (installing, bundling packages, ...)
pub fn phase(message: &str) {
    println!("{}", style(message).cyan().bold());
}

/// Print a per-item status line under the current phase
pub fn detail(message: &str) {
    println!("  {}", message);
}

/// Progress bar over the files written into the archive
pub struct FileProgress {
    pb: ProgressBar,
}

impl FileProgress {
    /// Create a progress bar for a known file count
    pub fn new(total_files: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total_files);
        pb.set_style(style);
        Self { pb }
    }

    /// A bar that renders nothing; used by tests and quiet callers
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Record one archived file
    pub fn archived(&self, name: &str) {
        // Truncate long entry names for display
        let display_name = if name.len() > 50 {
            format!("...{}", &name[name.len() - 47..])
        } else {
            name.to_string()
        };
        self.pb.set_message(display_name);
        self.pb.inc(1);
    }

    /// Finish the bar after a successful write
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
