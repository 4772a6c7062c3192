//! Provider trait for playback sources

use std::sync::Arc;

use crate::Result;
use crate::types::PlaybackEvent;

/// Handle on the video's position and speed
///
/// Reads happen on demand while the driver owns the provider. Seeking through
/// the clock is expected to make the provider report a
/// [`PlaybackEvent::Seeked`] like any other seek.
pub trait PlaybackClock: Send + Sync {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position to `position` seconds
    fn seek_to(&self, position: f64);

    /// Current playback speed multiplier
    fn playback_rate(&self) -> f64 {
        1.0
    }

    /// Change the playback speed; players without speed control ignore this
    fn set_playback_rate(&self, _rate: f64) {}
}

/// Trait for playback sources
///
/// A provider wraps whatever player hosts the video and turns its
/// frame-presentation callbacks and seek notifications into a single ordered
/// event stream. The driver owns the provider and asks for one event at a
/// time, so an implementation never sees a second request before the previous
/// one resolved.
#[async_trait::async_trait]
pub trait PlaybackProvider: Send + 'static {
    /// Wait for the next playback event
    ///
    /// Returns:
    /// - `Ok(Some(event))` - A frame was presented or the video was seeked
    /// - `Ok(None)` - Source ended (player torn down, recording exhausted)
    /// - `Err(e)` - Transient failure; the driver backs off and asks again
    async fn next_event(&mut self) -> Result<Option<PlaybackEvent>>;

    /// Handle for reading the playback position while the driver owns the provider
    fn clock(&self) -> Arc<dyn PlaybackClock>;

    /// Whether the player can report per-frame presentation callbacks at all
    fn supports_frame_callbacks(&self) -> bool {
        true
    }

    /// Whether there is a playable video to sample
    fn has_media(&self) -> bool {
        true
    }
}
