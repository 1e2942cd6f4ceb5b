//! Terminal progress reporting for a collection run.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len} {msg}";

/// A determinate progress bar over the weekday × collaborator steps of a
/// run. Hidden when disabled (logging enabled, or output not a terminal).
#[derive(Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(total: u64, enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(TEMPLATE)
                    .expect("could not create progress bar style")
                    .progress_chars("=> "),
            );
            bar.set_prefix("Collecting");
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn step(&self) {
        self.bar.inc(1);
    }

    /// Finish and clear the progress indicator.
    pub fn done(&self) {
        self.bar.finish_and_clear();
    }
}
