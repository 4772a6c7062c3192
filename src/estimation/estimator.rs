//! Frames-per-second estimate derived from a sample window

use crate::config::SamplerConfig;
use crate::types::SamplingProgress;

/// Turns a window of seconds-per-frame samples into an integer fps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsEstimator {
    capacity: usize,
    default_fps: u32,
}

impl Default for FpsEstimator {
    fn default() -> Self {
        Self::new(&SamplerConfig::default())
    }
}

impl FpsEstimator {
    pub fn new(config: &SamplerConfig) -> Self {
        Self { capacity: config.capacity, default_fps: config.default_fps.max(1) }
    }

    /// Mean seconds per frame, `0.0` for an empty window
    pub fn average(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Rounded frames per second, or the default when nothing usable was sampled
    pub fn fps(&self, samples: &[f64]) -> u32 {
        let average = Self::average(samples);
        if average > 0.0 {
            let fps = super::round_half_up(1.0 / average);
            if (1.0..=u32::MAX as f64).contains(&fps) {
                return fps as u32;
            }
        }
        self.default_fps
    }

    /// Whether the window has reached capacity
    pub fn is_ready(&self, samples: &[f64]) -> bool {
        samples.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_fps(&self) -> u32 {
        self.default_fps
    }

    /// Snapshot of the estimate for observers
    pub fn progress(&self, samples: &[f64]) -> SamplingProgress {
        SamplingProgress {
            samples: samples.len(),
            capacity: self.capacity,
            fps: self.fps(samples),
            ready: self.is_ready(samples),
        }
    }
}
