//! Frame-boundary quantization and time formatting

use serde::{Deserialize, Deserializer, Serialize};

use super::round_half_up;

/// Snaps continuous timestamps onto the frame grid of a given fps
///
/// Players report positions with limited precision (a 60 fps frame at
/// 0.666s is really 0.6667s), so every marked time goes through
/// [`round_to_frame`](Self::round_to_frame) before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TimeQuantizer {
    fps: u32,
}

impl TimeQuantizer {
    /// Create a quantizer for `fps` frames per second; zero is treated as one
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Index of the frame nearest to `seconds`
    pub fn estimate_frame(&self, seconds: f64) -> i64 {
        round_half_up(seconds * self.fps as f64) as i64
    }

    /// `seconds` moved onto the nearest exact frame boundary
    pub fn round_to_frame(&self, seconds: f64) -> f64 {
        self.estimate_frame(seconds) as f64 / self.fps as f64
    }

    /// Position `frames` frames away from `position`, on the frame grid
    ///
    /// Negative `frames` steps backwards; the result never goes before `0.0`.
    pub fn step(&self, position: f64, frames: i64) -> f64 {
        let target = self.estimate_frame(position).saturating_add(frames);
        (target as f64 / self.fps as f64).max(0.0)
    }
}

// Deserialized values go through `new` so a zero fps is clamped there too
impl<'de> Deserialize<'de> for TimeQuantizer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            fps: u32,
        }

        let Raw { fps } = Raw::deserialize(deserializer)?;
        Ok(Self::new(fps))
    }
}

/// Render seconds as `m:ss.mmm`
///
/// ```rust
/// use splitframe::format_secs;
///
/// assert_eq!(format_secs(65.5), "1:05.500");
/// assert_eq!(format_secs(5.0), "0:05.000");
/// ```
pub fn format_secs(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total_millis = round_half_up(seconds.abs() * 1000.0) as u64;
    let minutes = total_millis / 60_000;
    let millis = total_millis % 60_000;
    format!("{}{}:{:02}.{:03}", sign, minutes, millis / 1000, millis % 1000)
}
