//! Frame-rate estimation from live frame-timing callbacks.
//!
//! - [`FrameSampler`] keeps a bounded window of seconds-per-frame samples and
//!   decides which callbacks are trustworthy
//! - [`FpsEstimator`] turns the window into an integer fps and reports readiness
//! - [`TimeQuantizer`] snaps timestamps onto that fps's frame grid
//!
//! ```rust
//! use splitframe::{FrameSampler, FrameTick};
//!
//! let mut sampler = FrameSampler::default();
//! for frame in 0..=60u64 {
//!     sampler.on_tick(&FrameTick::new(frame, frame as f64 / 30.0));
//! }
//! assert!(sampler.is_ready());
//! assert_eq!(sampler.fps(), 30);
//! ```

mod estimator;
mod quantizer;
mod sampler;

pub use estimator::FpsEstimator;
pub use quantizer::{TimeQuantizer, format_secs};
pub use sampler::{FrameSampler, SampleRejection, TickOutcome};

/// Round to the nearest integer with halves going up, including for negatives
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

#[cfg(test)]
mod tests {
    use super::round_half_up;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(1.49), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(-1.51), -2.0);
    }
}
