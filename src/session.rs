//! Retiming session

use futures::StreamExt;
use futures::stream::BoxStream;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::SamplerConfig;
use crate::driver::Driver;
use crate::estimation::TimeQuantizer;
use crate::provider::{PlaybackClock, PlaybackProvider};
use crate::retime::{ModNote, RetimeCalculator, SplitLedger};
use crate::stream::ThrottleExt;
use crate::types::{RetimeResult, SamplingProgress, UpdateRate};
use crate::{Result, RetimeError};

/// One retiming session over one video
///
/// Owns the split ledger and the background sampling task. Dropping the
/// session (or calling [`close`](Self::close)) stops sampling.
pub struct RetimeSession {
    /// Progress watch receiver
    progress: watch::Receiver<SamplingProgress>,

    /// Position of the video, read when marking splits
    clock: Arc<dyn PlaybackClock>,

    ledger: SplitLedger,

    /// Manual adjustment added to the IGT, in seconds
    extra_time: f64,

    /// Cancellation token for stopping the driver
    cancel: CancellationToken,
}

impl RetimeSession {
    /// Playback speed used to skim through uninteresting stretches
    ///
    /// Ticks observed at this speed never become samples.
    pub const TURBO_SPEEDUP: f64 = 5.0;

    /// Start a session with the default sampler settings.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RetimeError::EnvironmentPrecondition`] if the provider cannot
    /// report frame callbacks or has no media to play.
    pub fn start<P: PlaybackProvider>(provider: P) -> Result<Self> {
        Self::start_with_config(provider, SamplerConfig::default())
    }

    /// Start a session with explicit sampler settings.
    pub fn start_with_config<P: PlaybackProvider>(
        provider: P,
        config: SamplerConfig,
    ) -> Result<Self> {
        config.validate()?;

        if !provider.supports_frame_callbacks() {
            return Err(RetimeError::environment(
                "the player does not report per-frame presentation callbacks",
            ));
        }
        if !provider.has_media() {
            return Err(RetimeError::environment("no playable video was found"));
        }

        let clock = provider.clock();
        let capacity = config.capacity;
        let channels = Driver::spawn(provider, config);

        info!(capacity, "Retiming session started, sampling frame rate");

        Ok(Self {
            progress: channels.progress,
            clock,
            ledger: SplitLedger::new(),
            extra_time: 0.0,
            cancel: channels.cancel,
        })
    }

    /// Stream of progress snapshots, starting with the current one
    ///
    /// With [`UpdateRate::Max`] intermediate snapshots are coalesced, but the
    /// snapshot that first reports `ready` is always delivered.
    pub fn progress(&self, rate: UpdateRate) -> BoxStream<'static, SamplingProgress> {
        let updates = WatchStream::new(self.progress.clone());

        match rate.throttle_interval() {
            None => updates.boxed(),
            Some(period) => updates.throttle_unless(period, |p| p.ready).boxed(),
        }
    }

    /// Latest progress snapshot
    pub fn current_progress(&self) -> SamplingProgress {
        *self.progress.borrow()
    }

    /// Current frames-per-second estimate
    pub fn fps(&self) -> u32 {
        self.progress.borrow().fps
    }

    /// Whether the frame rate has been determined
    pub fn is_ready(&self) -> bool {
        self.progress.borrow().ready
    }

    /// Wait until the frame rate is determined and return it
    ///
    /// Never resolves while playback keeps producing unusable samples; use
    /// [`wait_until_ready_timeout`](Self::wait_until_ready_timeout) when the
    /// caller needs a way out.
    ///
    /// # Errors
    ///
    /// Fails if sampling stops first: [`RetimeError::SessionClosed`] after
    /// [`close`](Self::close), otherwise a provider error.
    pub async fn wait_until_ready(&self) -> Result<u32> {
        let mut progress = self.progress.clone();
        match progress.wait_for(|p| p.ready).await {
            Ok(snapshot) => Ok(snapshot.fps),
            Err(_) if self.cancel.is_cancelled() => Err(RetimeError::SessionClosed),
            Err(_) => Err(RetimeError::provider_failed(
                "playback stopped before the frame rate was determined",
            )),
        }
    }

    /// [`wait_until_ready`](Self::wait_until_ready) bounded by `duration`
    pub async fn wait_until_ready_timeout(&self, duration: Duration) -> Result<u32> {
        tokio::time::timeout(duration, self.wait_until_ready())
            .await
            .map_err(|_| RetimeError::Timeout { duration })?
    }

    /// Quantizer for the current estimate
    pub fn quantizer(&self) -> TimeQuantizer {
        TimeQuantizer::new(self.fps())
    }

    /// Set the current split's start to the playback position
    pub fn mark_start(&mut self) -> f64 {
        let start = self.ledger.mark_start(self.clock.current_time(), &self.quantizer());
        debug!(split = self.ledger.current_index() + 1, start, "Marked split start");
        start
    }

    /// Set the current split's end to the playback position
    pub fn mark_end(&mut self) -> f64 {
        let end = self.ledger.mark_end(self.clock.current_time(), &self.quantizer());
        debug!(split = self.ledger.current_index() + 1, end, "Marked split end");
        end
    }

    /// Add an unset split after the current one and select it
    pub fn insert_split(&mut self) {
        self.ledger.insert_after_current();
    }

    /// Remove the current split unless it is the only one
    pub fn delete_split(&mut self) -> bool {
        self.ledger.delete_current()
    }

    /// Select the previous split; false at the first
    pub fn prev_split(&mut self) -> bool {
        self.ledger.prev()
    }

    /// Select the next split; false at the last
    pub fn next_split(&mut self) -> bool {
        self.ledger.next()
    }

    /// Splits marked so far and the selected one
    pub fn ledger(&self) -> &SplitLedger {
        &self.ledger
    }

    /// Seek `frames` frames forward (or back, when negative) on the frame grid
    ///
    /// Leaves turbo speed, since frame stepping is for close inspection.
    /// Returns the position seeked to.
    pub fn step_frames(&mut self, frames: i64) -> f64 {
        let target = self.quantizer().step(self.clock.current_time(), frames);
        self.clock.seek_to(target);
        self.set_turbo(false);
        debug!(frames, target, "Stepped frames");
        target
    }

    /// Whether the video plays at [`TURBO_SPEEDUP`](Self::TURBO_SPEEDUP)
    pub fn is_turbo(&self) -> bool {
        self.clock.playback_rate() == Self::TURBO_SPEEDUP
    }

    /// Switch between turbo and normal speed
    pub fn set_turbo(&self, enabled: bool) {
        let rate = if enabled { Self::TURBO_SPEEDUP } else { 1.0 };
        self.clock.set_playback_rate(rate);
    }

    /// Flip turbo speed and return the new state
    pub fn toggle_turbo(&self) -> bool {
        let enabled = !self.is_turbo();
        self.set_turbo(enabled);
        debug!(enabled, "Toggled turbo speed");
        enabled
    }

    /// Set the manual extra time; anything that is not a finite number counts as zero
    pub fn set_extra_time(&mut self, seconds: f64) {
        self.extra_time = if seconds.is_finite() { seconds } else { 0.0 };
    }

    /// Manual extra time in seconds
    pub fn extra_time(&self) -> f64 {
        self.extra_time
    }

    /// Retime the ledger at the current estimate
    pub fn retime(&self) -> RetimeResult {
        RetimeCalculator::new(self.fps()).calculate(self.ledger.splits(), self.extra_time)
    }

    /// Moderator note for the ledger, or `None` while it does not retime
    pub fn mod_note(&self) -> Option<ModNote> {
        ModNote::build(self.ledger.splits(), self.fps(), self.extra_time)
    }

    /// Stop sampling; the ledger stays readable
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            info!("Closing retiming session");
            self.cancel.cancel();
        }
    }

    /// Whether sampling has been stopped
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RetimeSession {
    fn drop(&mut self) {
        debug!("Dropping retiming session");
        self.cancel.cancel();
    }
}
