//! Text progress bar.

use std::fmt;

/// Fixed-width bar for a percentage.
///
/// ```rust
/// use harvis_core::display::ProgressBar;
///
/// assert_eq!(ProgressBar::new(40).to_string(), "[████████░░░░░░░░░░░░] 40%");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    percent: u8,
    width: usize,
}

impl ProgressBar {
    const DEFAULT_WIDTH: usize = 20;

    /// Creates a bar; values above 100 are clamped.
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
            width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = (self.width * self.percent as usize + 50) / 100;
        write!(
            f,
            "[{}{}] {}%",
            "█".repeat(filled),
            "░".repeat(self.width - filled),
            self.percent
        )
    }
}
