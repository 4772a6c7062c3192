//! Test utilities for building synthetic playback
//!
//! Shared by unit tests and the benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use crate::types::{FrameTick, PlaybackEvent};

/// `count` ticks of steady playback at `fps`, one presented frame per tick
///
/// Tick `i` reports `i` presented frames at media time `i / fps`.
pub fn constant_rate_ticks(fps: u32, count: usize) -> Vec<FrameTick> {
    let fps = f64::from(fps.max(1));
    (0..count).map(|i| FrameTick::new(i as u64, i as f64 / fps)).collect()
}

/// One tick per entry in `times`, with the presented-frame counter equal to the index
pub fn ticks_with_spacing(times: &[f64]) -> Vec<FrameTick> {
    times.iter().enumerate().map(|(i, &time)| FrameTick::new(i as u64, time)).collect()
}

/// Wrap ticks as playback events
pub fn frame_events(ticks: impl IntoIterator<Item = FrameTick>) -> Vec<PlaybackEvent> {
    ticks.into_iter().map(PlaybackEvent::Frame).collect()
}

/// Steady playback with a seek inserted before tick `seek_at`
///
/// Media time jumps by `jump` seconds at the seek, as it would when a viewer
/// skips ahead.
pub fn playback_with_seek(fps: u32, count: usize, seek_at: usize, jump: f64) -> Vec<PlaybackEvent> {
    let mut events = Vec::with_capacity(count + 1);
    for (i, tick) in constant_rate_ticks(fps, count).into_iter().enumerate() {
        if i == seek_at {
            events.push(PlaybackEvent::Seeked);
        }
        let tick = if i >= seek_at {
            FrameTick { media_time: tick.media_time + jump, ..tick }
        } else {
            tick
        };
        events.push(PlaybackEvent::Frame(tick));
    }
    events
}
