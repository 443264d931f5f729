use crate::core::actions::adjust_precision::DEFAULT_SIGNIFICANT_DIGITS;
use crate::core::data::checkpoint::Checkpoint;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::viewport::Viewport;
use crate::core::util::calculate_row_bands::available_workers;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Settings fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub frame_size: FrameSize,
    pub workers: NonZeroUsize,
    /// Digits kept distinguishable across the viewport span.
    pub significant_digits: u32,
}

impl RunConfig {
    #[must_use]
    pub fn new(frame_size: FrameSize) -> Self {
        Self {
            frame_size,
            workers: available_workers(),
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }

    #[must_use]
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_significant_digits(mut self, significant_digits: u32) -> Self {
        self.significant_digits = significant_digits;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunStart {
    /// Frame 0 from the first frame's bounds with no elapsed time.
    Fresh,
    Resume(Checkpoint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames_rendered: usize,
    /// First frame not rendered; equals the sequence length when the run finished.
    pub next_frame: usize,
    pub final_viewport: Viewport,
    /// Total across this run and every run it resumed from.
    pub elapsed: Duration,
}
