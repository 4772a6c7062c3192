//! Sampling progress snapshots

use serde::{Deserialize, Serialize};

/// State of the frame-rate estimate after an event was processed
///
/// Observers re-read this on every notification to drive a progress
/// indicator; `samples / capacity` is the fill ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SamplingProgress {
    /// Accepted samples currently in the window
    pub samples: usize,

    /// Window capacity
    pub capacity: usize,

    /// Current frames-per-second estimate
    pub fps: u32,

    /// Whether the window has filled and the estimate is final
    pub ready: bool,
}

impl SamplingProgress {
    /// Progress before any sample was taken
    pub fn initial(capacity: usize, default_fps: u32) -> Self {
        Self { samples: 0, capacity, fps: default_fps, ready: false }
    }

    /// Fill ratio in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.capacity == 0 {
            return 1.0;
        }
        (self.samples as f64 / self.capacity as f64).min(1.0)
    }
}
