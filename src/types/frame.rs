//! Playback event types delivered by providers

use serde::{Deserialize, Serialize};

/// One frame-presentation callback from the player
///
/// Carries the cumulative presented-frame counter and media clock reported
/// for the frame, plus the playback conditions observed when it fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct FrameTick {
    /// Cumulative count of frames presented so far
    pub presented_frames: u64,

    /// Media position of the presented frame in seconds
    pub media_time: f64,

    /// Playback speed multiplier at the time of the callback
    pub playback_rate: f64,

    /// Whether the hosting document had focus
    pub focused: bool,
}

impl FrameTick {
    /// Create a tick observed at normal speed with focus
    pub fn new(presented_frames: u64, media_time: f64) -> Self {
        Self { presented_frames, media_time, playback_rate: 1.0, focused: true }
    }

    /// Override the playback rate observed for this tick
    pub fn with_playback_rate(mut self, playback_rate: f64) -> Self {
        self.playback_rate = playback_rate;
        self
    }

    /// Override the focus state observed for this tick
    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Event emitted by a playback source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum PlaybackEvent {
    /// A video frame was presented
    Frame(FrameTick),

    /// The playback position was seeked
    Seeked,
}

impl From<FrameTick> for PlaybackEvent {
    fn from(tick: FrameTick) -> Self {
        PlaybackEvent::Frame(tick)
    }
}
