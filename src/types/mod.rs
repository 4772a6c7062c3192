//! Core data types shared by the sampler, ledger and session layers.
//!
//! ## Overview
//!
//! - [`FrameTick`] and [`PlaybackEvent`] are what a provider delivers
//! - [`SamplingProgress`] is what the driver publishes after each event
//! - [`Split`] is one marked segment in the ledger
//! - [`RetimeResult`] is the outcome of aggregating a ledger
//! - [`UpdateRate`] controls how often progress observers are woken
//!
//! ## Usage Example
//!
//! ```rust
//! use splitframe::types::{FailureReason, Split};
//!
//! let split = Split::with_bounds(1.0, 3.5);
//! assert_eq!(split.duration(), Some(2.5));
//!
//! // An unset end means the split is not usable yet
//! assert_eq!(Split::with_bounds(1.0, 0.0).duration(), None);
//! # let _ = FailureReason::OutOfOrder;
//! ```

mod frame;
mod progress;
mod retime;
mod split;
mod update_rate;

pub use frame::{FrameTick, PlaybackEvent};
pub use progress::SamplingProgress;
pub use retime::{FailureReason, Retime, RetimeFailure, RetimeResult};
pub use split::Split;
pub use update_rate::UpdateRate;
