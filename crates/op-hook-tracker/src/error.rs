//! Error types for op-hook-tracker
//!
//! Tracker operations themselves never fail. These errors only come from
//! parsing hook vocabulary out of strings and from metric registration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookTrackerError {
    #[error("Invalid hook source: {0:?} (expected \"spec\" or \"annotation\")")]
    InvalidSource(String),

    #[error("Invalid hook phase: {0:?} (expected \"pre\" or \"post\")")]
    InvalidPhase(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, HookTrackerError>;

impl HookTrackerError {
    /// Create an invalid source error
    pub fn invalid_source(value: impl Into<String>) -> Self {
        HookTrackerError::InvalidSource(value.into())
    }

    /// Create an invalid phase error
    pub fn invalid_phase(value: impl Into<String>) -> Self {
        HookTrackerError::InvalidPhase(value.into())
    }
}
