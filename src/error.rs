//! Error types for retiming sessions.
//!
//! Only session plumbing produces errors. Sample rejection is an internal
//! outcome of the sampler and split validation failures are values inside
//! [`RetimeResult`](crate::RetimeResult), so neither appears here.
//!
//! ## Error Categories
//!
//! - **Environment Errors**: The playback source cannot support a session at all
//! - **Provider Errors**: The playback source failed while delivering events
//! - **Timeout Errors**: A caller-imposed wait expired before fps was ready
//! - **Config Errors**: Configuration could not be read or failed validation
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use splitframe::RetimeError;
//!
//! let error = RetimeError::provider_failed("frame callback stream stalled");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for retiming operations.
pub type Result<T, E = RetimeError> = std::result::Result<T, E>;

/// Main error type for retiming sessions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RetimeError {
    #[error("Cannot start retiming session: {requirement}")]
    EnvironmentPrecondition { requirement: String },

    #[error("Playback provider failed: {reason}")]
    Provider {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("FPS estimation not ready after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Configuration error in {context}: {details}")]
    Config { context: String, details: String },

    #[error("Config file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Retiming session has been closed")]
    SessionClosed,
}

impl RetimeError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            RetimeError::Provider { .. } => true,
            RetimeError::Timeout { .. } => true,
            RetimeError::EnvironmentPrecondition { .. } => false,
            RetimeError::Config { .. } => false,
            RetimeError::File { .. } => false,
            RetimeError::SessionClosed => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RetimeError::EnvironmentPrecondition { .. } => vec![
                "Use a player that reports per-frame presentation callbacks",
                "Open the page that actually hosts the video",
                "Make sure a playable video is loaded",
            ],
            RetimeError::Provider { .. } => vec![
                "Check that the video is still loaded",
                "Resume playback at normal speed",
                "Start a new session",
            ],
            RetimeError::Timeout { .. } => vec![
                "Let the video play at 1x speed with the window focused",
                "Avoid seeking while the frame rate is being measured",
                "Increase the wait duration",
            ],
            RetimeError::Config { .. } => vec![
                "Check configuration values against their documented ranges",
                "Remove the setting to fall back to the default",
            ],
            RetimeError::File { .. } => {
                vec!["Check file exists and is readable", "Check file permissions"]
            }
            RetimeError::SessionClosed => vec!["Start a new session"],
        }
    }

    /// Helper constructor for environment precondition failures.
    pub fn environment(requirement: impl Into<String>) -> Self {
        RetimeError::EnvironmentPrecondition { requirement: requirement.into() }
    }

    /// Helper constructor for provider errors.
    pub fn provider_failed(reason: impl Into<String>) -> Self {
        RetimeError::Provider { reason: reason.into(), source: None }
    }

    /// Helper constructor for provider errors with source.
    pub fn provider_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        RetimeError::Provider { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for configuration errors.
    pub fn config(context: impl Into<String>, details: impl Into<String>) -> Self {
        RetimeError::Config { context: context.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        RetimeError::File { path, source }
    }
}

impl From<serde_yaml_ng::Error> for RetimeError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        RetimeError::Config { context: "YAML parsing".to_string(), details: err.to_string() }
    }
}
