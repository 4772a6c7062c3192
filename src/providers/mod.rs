//! Playback provider implementations

pub mod timeline;

pub use timeline::{TimelineClock, TimelineProvider};
