//! Progress bar display management and coordination.
//!
//! [`ProgressDisplay`] coordinates the main file-count bar with the byte
//! bars created per streamed download. Bars are hidden wholesale when the
//! style options disable them.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: Arc<MultiProgress>,
    /// The main progress bar counting processed files.
    main: Arc<ProgressBar>,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a new progress display manager sized to the number of
    /// planned downloads.
    pub fn new(style_options: StyleOptions, total_downloads: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => Arc::new(MultiProgress::new()),
            false => Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
        };

        let main = Arc::new(
            multi.add(
                style_options
                    .main()
                    .clone()
                    .to_progress_bar(total_downloads as u64),
            ),
        );
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Get the multi-progress instance for adding child progress bars.
    pub fn multi(&self) -> Arc<MultiProgress> {
        self.multi.clone()
    }

    /// Get the main progress bar.
    pub fn main(&self) -> Arc<ProgressBar> {
        self.main.clone()
    }

    /// Create a child progress bar for the bytes of one streamed download.
    pub fn create_child_progress(&self, size: u64) -> ProgressBar {
        self.multi
            .add(self.style_options.child().clone().to_progress_bar(size))
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the progress display, clearing or keeping bars based on
    /// configuration.
    pub fn finish(&self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }
}
