//! Retime calculation results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a ledger could not be retimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum FailureReason {
    /// A split starts before the previous split ends
    OutOfOrder,

    /// A split's end is unset or not after its start
    InvalidDuration,
}

/// A failed retime, naming the offending split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RetimeFailure {
    pub reason: FailureReason,

    /// 1-based position of the offending split
    pub split_index: usize,
}

impl fmt::Display for RetimeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            FailureReason::OutOfOrder => write!(f, "split {} is out of order", self.split_index),
            FailureReason::InvalidDuration => {
                write!(f, "start time isn't before end time on split {}", self.split_index)
            }
        }
    }
}

/// Aggregated times for a valid ledger, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Retime {
    /// Sum of split durations plus extra time
    pub igt: f64,

    /// Span from the first split's start to the last split's end
    pub rta: f64,
}

/// Outcome of a retime calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum RetimeResult {
    Success(Retime),
    Failure(RetimeFailure),
}

impl RetimeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RetimeResult::Success(_))
    }

    /// The aggregated times, if the ledger was valid
    pub fn retime(&self) -> Option<Retime> {
        match self {
            RetimeResult::Success(retime) => Some(*retime),
            RetimeResult::Failure(_) => None,
        }
    }

    /// The failure, if the ledger was invalid
    pub fn failure(&self) -> Option<RetimeFailure> {
        match self {
            RetimeResult::Success(_) => None,
            RetimeResult::Failure(failure) => Some(*failure),
        }
    }
}
