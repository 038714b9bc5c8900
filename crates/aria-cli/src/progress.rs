//! Progress display for long-running commands.

use std::time::Duration;

use aria_core::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// A spinner or bar that is hidden entirely when output is plain.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Spinner shown while waiting on the model.
    #[must_use]
    pub fn spinner(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Task bar for interactive walks; created on [`ProgressSink::start`].
    #[must_use]
    pub fn tasks(enabled: bool) -> Self {
        Self {
            bar: enabled.then(|| ProgressBar::new(0)),
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl ProgressSink for Progress {
    fn start(&mut self, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
        }
    }

    fn advance(&mut self, title: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(title.to_string());
            bar.inc(1);
        }
    }

    fn notice(&mut self, message: &str) {
        match &self.bar {
            Some(bar) => bar.println(format!("⚠ {message}")),
            None => println!("⚠ {message}"),
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("done");
        }
    }
}
