//! Frame-accurate retiming of speedrun videos.
//!
//! Splitframe estimates a video's frame rate from the player's per-frame
//! presentation callbacks, snaps the times a verifier marks onto that frame
//! grid, and aggregates the marked splits into in-game time (IGT) and real
//! time (RTA).
//!
//! # Features
//!
//! - **Frame-rate estimation**: Bounded sampling window with outlier, seek and
//!   playback-speed rejection
//! - **Split ledger**: Ordered, editable list of marked segments
//! - **Retime**: IGT/RTA aggregation with ordering checks and a ready-to-paste
//!   moderator note
//! - **Async sessions**: Sampling runs on a tokio task; progress is a stream
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use splitframe::{RetimeSession, TimelineProvider, UpdateRate};
//! use futures::StreamExt;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> splitframe::Result<()> {
//!     let provider = TimelineProvider::constant_rate(60, 600);
//!     let clock = provider.timeline_clock();
//!     let mut session = RetimeSession::start(provider)?;
//!
//!     let mut progress = Box::pin(session.progress(UpdateRate::Max(4)));
//!     while let Some(p) = progress.next().await {
//!         println!("sampling {:.0}%", p.fraction() * 100.0);
//!         if p.ready {
//!             break;
//!         }
//!     }
//!
//!     clock.seek(1.0);
//!     session.mark_start();
//!     clock.seek(4.25);
//!     session.mark_end();
//!
//!     if let Some(note) = session.mod_note() {
//!         println!("{note}");
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Estimation and retiming
pub mod estimation;
pub mod retime;

// Stream-based session architecture
pub mod driver;
pub mod provider;
pub mod providers;
mod session;
pub mod stream;

// Core exports
pub use error::*;
pub use types::*;

pub use config::{Config, LoggingConfig, SamplerConfig, init_logging};
pub use estimation::{
    FpsEstimator, FrameSampler, SampleRejection, TickOutcome, TimeQuantizer, format_secs,
};
pub use retime::{ModNote, RetimeCalculator, SplitLedger};

// Main API exports
pub use provider::{PlaybackClock, PlaybackProvider};
pub use providers::{TimelineClock, TimelineProvider};
pub use session::RetimeSession;
