//! Update rate control for progress streams

use serde::{Deserialize, Serialize};

/// Update rate for progress streams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum UpdateRate {
    /// Every processed playback event (one per presented frame)
    Native,

    /// Coalesced to at most this many updates per second
    Max(u32),
}

impl UpdateRate {
    /// Get the coalescing interval, if any
    ///
    /// `Max(0)` is treated as `Native` since it names no usable interval.
    pub fn throttle_interval(self) -> Option<std::time::Duration> {
        match self {
            UpdateRate::Native | UpdateRate::Max(0) => None,
            UpdateRate::Max(hz) => Some(std::time::Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}
