//! Split boundaries

use serde::{Deserialize, Serialize};

/// One marked segment of a timed run
///
/// Both boundaries are seconds into the video. `0.0` doubles as the "unset"
/// sentinel, so a split whose end was never marked has no duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Split {
    pub start: f64,
    pub end: f64,
}

impl Split {
    /// Create a split with both boundaries unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a split with explicit boundaries
    pub fn with_bounds(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the split, or `None` when the end is unset or not after the start
    pub fn duration(&self) -> Option<f64> {
        if self.end != 0.0 && self.start < self.end { Some(self.end - self.start) } else { None }
    }
}
