//! Aggregation of a split ledger into IGT and RTA

use crate::estimation::TimeQuantizer;
use crate::types::{FailureReason, Retime, RetimeFailure, RetimeResult, Split};

/// Validates splits and sums them at a fixed fps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetimeCalculator {
    quantizer: TimeQuantizer,
}

impl RetimeCalculator {
    pub fn new(fps: u32) -> Self {
        Self { quantizer: TimeQuantizer::new(fps) }
    }

    pub fn with_quantizer(quantizer: TimeQuantizer) -> Self {
        Self { quantizer }
    }

    /// Retime `splits` in order, adding `extra_time` to the IGT
    ///
    /// Stops at the first split that starts before its predecessor ends or
    /// has no duration. An empty slice has nothing to time and fails on
    /// split 1.
    pub fn calculate(&self, splits: &[Split], extra_time: f64) -> RetimeResult {
        let (Some(first), Some(last)) = (splits.first(), splits.last()) else {
            return RetimeResult::Failure(RetimeFailure {
                reason: FailureReason::InvalidDuration,
                split_index: 1,
            });
        };

        let mut accumulated = 0.0;
        let mut last_end = 0.0;

        for (i, split) in splits.iter().enumerate() {
            if i > 0 && split.start < last_end {
                return RetimeResult::Failure(RetimeFailure {
                    reason: FailureReason::OutOfOrder,
                    split_index: i + 1,
                });
            }
            let Some(duration) = split.duration() else {
                return RetimeResult::Failure(RetimeFailure {
                    reason: FailureReason::InvalidDuration,
                    split_index: i + 1,
                });
            };
            last_end = split.end;
            accumulated += duration;
        }

        RetimeResult::Success(Retime {
            igt: self.quantizer.round_to_frame(accumulated) + extra_time,
            rta: self.quantizer.round_to_frame(last.end - first.start),
        })
    }

    pub fn quantizer(&self) -> TimeQuantizer {
        self.quantizer
    }
}
