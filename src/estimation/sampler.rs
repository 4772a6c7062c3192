//! Frame-timing sampler
//!
//! Each presented frame yields one seconds-per-frame sample computed from the
//! change in media time over the change in presented-frame count since the
//! previous callback. Samples are only trusted while the video plays at 1x
//! with the page focused, and only when they agree with what has been
//! collected so far. A run that goes wrong early is thrown away entirely.

use tracing::{debug, trace};

use super::FpsEstimator;
use crate::config::SamplerConfig;
use crate::types::{FrameTick, PlaybackEvent, SamplingProgress};

/// Why a sample was not added to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRejection {
    /// Not a finite positive number (first tick, stalled clock, frame counter unchanged)
    Invalid,
    /// Window already at capacity
    WindowFull,
    /// Video not playing at normal speed
    PlaybackRate,
    /// Hosting document not focused, callbacks are throttled
    Unfocused,
    /// Too far from the running average
    Outlier,
}

/// What the sampler did with one playback event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Sample appended to the window
    Accepted,
    /// Tick ignored because it followed a seek
    Skipped,
    /// Sample discarded; `reset` when the whole window was cleared with it
    Rejected { reason: SampleRejection, reset: bool },
    /// Seek handled; `popped` when the latest sample was withdrawn
    Seeked { popped: bool },
}

/// Bounded window of frame-timing samples
#[derive(Debug, Clone)]
pub struct FrameSampler {
    config: SamplerConfig,
    estimator: FpsEstimator,
    window: Vec<f64>,
    previous: Option<(u64, f64)>,
    disregard_next: bool,
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

impl FrameSampler {
    pub fn new(config: SamplerConfig) -> Self {
        let estimator = FpsEstimator::new(&config);
        let window = Vec::with_capacity(config.capacity);
        Self { config, estimator, window, previous: None, disregard_next: false }
    }

    /// Feed one playback event
    pub fn process(&mut self, event: &PlaybackEvent) -> TickOutcome {
        match event {
            PlaybackEvent::Frame(tick) => self.on_tick(tick),
            PlaybackEvent::Seeked => TickOutcome::Seeked { popped: self.on_seek() },
        }
    }

    /// Handle a frame-presentation callback
    pub fn on_tick(&mut self, tick: &FrameTick) -> TickOutcome {
        let sample = match self.previous {
            Some((frames, time)) => {
                let frame_delta = tick.presented_frames.abs_diff(frames) as f64;
                let time_delta = (tick.media_time - time).abs();
                time_delta / frame_delta
            }
            None => f64::NAN,
        };
        self.previous = Some((tick.presented_frames, tick.media_time));

        if self.disregard_next {
            self.disregard_next = false;
            trace!(sample, "Skipping tick after seek");
            return TickOutcome::Skipped;
        }

        match self.check(sample, tick) {
            None => {
                self.window.push(sample);
                trace!(sample, samples = self.window.len(), "Accepted frame sample");
                TickOutcome::Accepted
            }
            Some(reason) => {
                let reset = self.window.len() < self.config.reset_threshold;
                if reset {
                    if !self.window.is_empty() {
                        debug!(
                            ?reason,
                            discarded = self.window.len(),
                            "Early sample run rejected, resetting window"
                        );
                    }
                    self.window.clear();
                } else {
                    trace!(?reason, sample, "Dropped frame sample");
                }
                TickOutcome::Rejected { reason, reset }
            }
        }
    }

    /// Handle a seek notification
    ///
    /// The sample taken just before the seek straddles the jump, as does the
    /// first one after it, so the former is withdrawn and the latter skipped.
    /// Once the window is full nothing changes.
    pub fn on_seek(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        let popped = self.window.pop().is_some();
        self.disregard_next = true;
        debug!(popped, samples = self.window.len(), "Seek observed while sampling");
        popped
    }

    fn check(&self, sample: f64, tick: &FrameTick) -> Option<SampleRejection> {
        if !(sample.is_finite() && sample > 0.0) {
            return Some(SampleRejection::Invalid);
        }
        if self.is_full() {
            return Some(SampleRejection::WindowFull);
        }
        if tick.playback_rate != 1.0 {
            return Some(SampleRejection::PlaybackRate);
        }
        if !tick.focused {
            return Some(SampleRejection::Unfocused);
        }
        if !self.is_close_to_average(sample) {
            return Some(SampleRejection::Outlier);
        }
        None
    }

    fn is_close_to_average(&self, sample: f64) -> bool {
        let average = self.average();
        if average == 0.0 {
            return true;
        }
        (average - sample).abs() < average * self.config.outlier_tolerance
    }

    /// Accepted samples, oldest first
    pub fn samples(&self) -> &[f64] {
        &self.window
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.window.len() >= self.config.capacity
    }

    /// Whether the next frame tick will be skipped
    pub fn is_disregarding_next(&self) -> bool {
        self.disregard_next
    }

    pub fn average(&self) -> f64 {
        FpsEstimator::average(&self.window)
    }

    pub fn fps(&self) -> u32 {
        self.estimator.fps(&self.window)
    }

    pub fn is_ready(&self) -> bool {
        self.estimator.is_ready(&self.window)
    }

    pub fn progress(&self) -> SamplingProgress {
        self.estimator.progress(&self.window)
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{constant_rate_ticks, ticks_with_spacing};

    fn feed(sampler: &mut FrameSampler, ticks: &[FrameTick]) -> Vec<TickOutcome> {
        ticks.iter().map(|tick| sampler.on_tick(tick)).collect()
    }

    #[test]
    fn first_tick_has_no_sample() {
        let mut sampler = FrameSampler::default();
        let outcome = sampler.on_tick(&FrameTick::new(100, 3.0));
        assert_eq!(
            outcome,
            TickOutcome::Rejected { reason: SampleRejection::Invalid, reset: true }
        );
        assert!(sampler.is_empty());
    }

    #[test]
    fn steady_sixty_fills_window_and_estimates_sixty() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 61));

        assert_eq!(sampler.len(), 60);
        assert!(sampler.is_ready());
        assert_eq!(sampler.fps(), 60);
        assert!(sampler.samples().iter().all(|s| (s - 1.0 / 60.0).abs() < 1e-12));
    }

    #[test]
    fn window_never_exceeds_capacity() {
        let mut sampler = FrameSampler::default();
        let outcomes = feed(&mut sampler, &constant_rate_ticks(30, 200));

        assert_eq!(sampler.len(), 60);
        assert_eq!(sampler.fps(), 30);
        assert!(outcomes.contains(&TickOutcome::Rejected {
            reason: SampleRejection::WindowFull,
            reset: false
        }));
    }

    #[test]
    fn skipped_frames_are_divided_out() {
        let mut sampler = FrameSampler::default();
        // Media time advances two frames for each callback
        let ticks: Vec<FrameTick> =
            (0..10).map(|i| FrameTick::new(i * 2, i as f64 * 2.0 / 50.0)).collect();
        feed(&mut sampler, &ticks);

        assert_eq!(sampler.len(), 9);
        assert_eq!(sampler.fps(), 50);
    }

    #[test]
    fn fast_forward_samples_are_ignored() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 11));
        let len = sampler.len();
        let average = sampler.average();

        let tick = FrameTick::new(11, 11.0 / 60.0).with_playback_rate(2.0);
        let outcome = sampler.on_tick(&tick);

        assert_eq!(
            outcome,
            TickOutcome::Rejected { reason: SampleRejection::PlaybackRate, reset: false }
        );
        assert_eq!(sampler.len(), len);
        assert_eq!(sampler.average(), average);
    }

    #[test]
    fn unfocused_samples_are_ignored() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 11));

        let tick = FrameTick::new(11, 11.0 / 60.0).with_focus(false);
        assert_eq!(
            sampler.on_tick(&tick),
            TickOutcome::Rejected { reason: SampleRejection::Unfocused, reset: false }
        );
        assert_eq!(sampler.len(), 10);
    }

    #[test]
    fn early_rejection_resets_window() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 4));
        assert_eq!(sampler.len(), 3);

        let tick = FrameTick::new(4, 4.0 / 60.0).with_focus(false);
        let outcome = sampler.on_tick(&tick);

        assert_eq!(
            outcome,
            TickOutcome::Rejected { reason: SampleRejection::Unfocused, reset: true }
        );
        assert!(sampler.is_empty());
    }

    #[test]
    fn outlier_boundary_is_strict() {
        let mut sampler = FrameSampler::default();
        // Five samples of exactly 5.0 seconds per frame
        feed(&mut sampler, &ticks_with_spacing(&[0.0, 5.0, 10.0, 15.0, 20.0, 25.0]));
        assert_eq!(sampler.len(), 5);
        assert_eq!(sampler.average(), 5.0);

        // Exactly 20% above the average
        let outcome = sampler.on_tick(&FrameTick::new(6, 31.0));
        assert_eq!(
            outcome,
            TickOutcome::Rejected { reason: SampleRejection::Outlier, reset: false }
        );
        assert_eq!(sampler.len(), 5);

        // Just under 20% above the average
        let outcome = sampler.on_tick(&FrameTick::new(7, 36.999));
        assert_eq!(outcome, TickOutcome::Accepted);
        assert_eq!(sampler.len(), 6);
    }

    #[test]
    fn seek_pops_last_sample_and_skips_one_tick() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 11));
        assert_eq!(sampler.len(), 10);

        assert_eq!(sampler.process(&PlaybackEvent::Seeked), TickOutcome::Seeked { popped: true });
        assert_eq!(sampler.len(), 9);
        assert!(sampler.is_disregarding_next());

        // Tick straddling the seek is skipped even though it looks valid
        assert_eq!(sampler.on_tick(&FrameTick::new(500, 500.0 / 60.0)), TickOutcome::Skipped);
        assert_eq!(sampler.len(), 9);
        assert!(!sampler.is_disregarding_next());

        // Sampling resumes from the post-seek position
        assert_eq!(sampler.on_tick(&FrameTick::new(501, 501.0 / 60.0)), TickOutcome::Accepted);
        assert_eq!(sampler.len(), 10);
    }

    #[test]
    fn seek_after_ready_changes_nothing() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 61));
        assert!(sampler.is_ready());

        assert_eq!(sampler.process(&PlaybackEvent::Seeked), TickOutcome::Seeked { popped: false });
        assert_eq!(sampler.len(), 60);
        assert!(!sampler.is_disregarding_next());
    }

    #[test]
    fn ready_latches_once_full() {
        let mut sampler = FrameSampler::default();
        feed(&mut sampler, &constant_rate_ticks(60, 61));

        // Garbage after the window is full is dropped, never reset
        let garbage = [
            FrameTick::new(61, 100.0),
            FrameTick::new(61, 100.0),
            FrameTick::new(70, 0.0).with_focus(false),
        ];
        feed(&mut sampler, &garbage);
        sampler.on_seek();

        assert!(sampler.is_ready());
        assert_eq!(sampler.fps(), 60);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_event() -> impl Strategy<Value = PlaybackEvent> {
            prop_oneof![
                8 => (0u64..10_000, 0.0f64..600.0, prop::bool::weighted(0.9), prop::bool::weighted(0.9))
                    .prop_map(|(frames, time, normal_speed, focused)| {
                        let rate = if normal_speed { 1.0 } else { 2.0 };
                        PlaybackEvent::Frame(
                            FrameTick::new(frames, time).with_playback_rate(rate).with_focus(focused),
                        )
                    }),
                1 => Just(PlaybackEvent::Seeked),
            ]
        }

        proptest! {
            #[test]
            fn window_length_is_bounded(events in prop::collection::vec(arb_event(), 0..400)) {
                let mut sampler = FrameSampler::default();
                for event in &events {
                    sampler.process(event);
                    prop_assert!(sampler.len() <= 60);
                }
            }

            #[test]
            fn off_speed_ticks_never_change_window(
                frames in 1u64..1000,
                time in 0.0f64..600.0,
                rate in prop::sample::select(vec![0.25, 0.5, 1.5, 2.0, 5.0]),
            ) {
                let mut sampler = FrameSampler::default();
                for tick in constant_rate_ticks(60, 20) {
                    sampler.on_tick(&tick);
                }
                let len = sampler.len();
                let average = sampler.average();

                sampler.on_tick(&FrameTick::new(19 + frames, time).with_playback_rate(rate));

                prop_assert_eq!(sampler.len(), len);
                prop_assert_eq!(sampler.average(), average);
            }

            #[test]
            fn constant_rate_estimates_that_rate(fps in 10u32..=240) {
                let mut sampler = FrameSampler::default();
                for tick in constant_rate_ticks(fps, 61) {
                    sampler.on_tick(&tick);
                }
                prop_assert!(sampler.is_ready());
                prop_assert_eq!(sampler.fps(), fps);
            }
        }
    }
}
