//! Timeline provider for recorded or synthesized playback

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{Duration, Interval, MissedTickBehavior, interval};
use tracing::{debug, info, trace};

use crate::Result;
use crate::provider::{PlaybackClock, PlaybackProvider};
use crate::types::{FrameTick, PlaybackEvent};

/// Playback position and speed shared between a timeline and its session
///
/// Follows the media time of the last delivered frame. Embedders that drive
/// the timeline from a real player can also move it directly with
/// [`seek`](Self::seek).
#[derive(Debug)]
pub struct TimelineClock {
    position_bits: AtomicU64,
    rate_bits: AtomicU64,
}

impl Default for TimelineClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl TimelineClock {
    /// A clock at `position` seconds playing at normal speed
    pub fn new(position: f64) -> Self {
        Self {
            position_bits: AtomicU64::new(position.to_bits()),
            rate_bits: AtomicU64::new(1.0f64.to_bits()),
        }
    }

    /// Move the playback position
    pub fn seek(&self, position: f64) {
        self.position_bits.store(position.to_bits(), Ordering::Release);
    }

    pub fn position(&self) -> f64 {
        f64::from_bits(self.position_bits.load(Ordering::Acquire))
    }

    pub fn rate(&self) -> f64 {
        f64::from_bits(self.rate_bits.load(Ordering::Acquire))
    }
}

impl PlaybackClock for TimelineClock {
    fn current_time(&self) -> f64 {
        self.position()
    }

    fn seek_to(&self, position: f64) {
        self.seek(position);
    }

    fn playback_rate(&self) -> f64 {
        self.rate()
    }

    fn set_playback_rate(&self, rate: f64) {
        self.rate_bits.store(rate.to_bits(), Ordering::Release);
    }
}

/// Provider that plays back a prepared list of events
pub struct TimelineProvider {
    /// Events not yet delivered
    events: VecDeque<PlaybackEvent>,

    /// Delay between events; zero delivers as fast as they are requested
    pacing: Duration,

    /// Created on first use so construction does not need a runtime
    interval: Option<Interval>,

    clock: Arc<TimelineClock>,
}

impl TimelineProvider {
    /// Create a provider delivering `events` in order, one per `pacing`
    pub fn new(events: impl IntoIterator<Item = PlaybackEvent>, pacing: Duration) -> Self {
        let events: VecDeque<PlaybackEvent> = events.into_iter().collect();
        info!("Timeline loaded: {} events, {:?} apart", events.len(), pacing);
        Self { events, pacing, interval: None, clock: Arc::new(TimelineClock::new(0.0)) }
    }

    /// Playback of `frames` frames at a constant `fps`, paced in real time
    pub fn constant_rate(fps: u32, frames: u64) -> Self {
        let fps = fps.max(1);
        let events = (0..frames)
            .map(|frame| PlaybackEvent::Frame(FrameTick::new(frame, frame as f64 / fps as f64)));
        Self::new(events, Duration::from_secs_f64(1.0 / fps as f64))
    }

    /// Change the delay between events
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self.interval = None;
        self
    }

    /// Append more events after the ones already queued
    pub fn extend(&mut self, events: impl IntoIterator<Item = PlaybackEvent>) {
        self.events.extend(events);
    }

    /// Shared handle to the playback position
    pub fn timeline_clock(&self) -> Arc<TimelineClock> {
        Arc::clone(&self.clock)
    }

    /// Events not yet delivered
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    async fn pace(&mut self) {
        if self.pacing.is_zero() {
            tokio::task::yield_now().await;
            return;
        }
        let pacing = self.pacing;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval(pacing);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}

#[async_trait::async_trait]
impl PlaybackProvider for TimelineProvider {
    async fn next_event(&mut self) -> Result<Option<PlaybackEvent>> {
        if self.events.is_empty() {
            debug!("Reached end of timeline");
            return Ok(None);
        }

        self.pace().await;

        let Some(event) = self.events.pop_front() else {
            return Ok(None);
        };

        if let PlaybackEvent::Frame(tick) = &event {
            self.clock.seek(tick.media_time);
        }
        trace!(?event, remaining = self.events.len(), "Timeline event");

        Ok(Some(event))
    }

    fn clock(&self) -> Arc<dyn PlaybackClock> {
        self.clock.clone()
    }

    fn has_media(&self) -> bool {
        !self.events.is_empty()
    }
}
