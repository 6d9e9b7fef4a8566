//! Core error types for pomocycle-core.
//!
//! Nothing in here is fatal to a running session: state transitions that
//! are refused come back as [`CoreError::InvalidStateTransition`], bad
//! configuration is replaced by defaults, and notification failures are
//! swallowed at the notifier boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomocycle-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A command was issued in a state that does not allow it
    /// (e.g. switching phase while the clock is running).
    #[error("Invalid state transition for '{action}': {reason}")]
    InvalidStateTransition { action: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session actor is gone (shut down or panicked)
    #[error("Session actor is no longer running")]
    SessionClosed,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Value could not be parsed as the type of the existing key
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Numeric value outside the accepted range
    #[error("Value {value} for '{key}' is out of range ({min}..={max})")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised by a [`CompletionNotifier`](crate::notify::CompletionNotifier).
///
/// The engine logs these and moves on; they never reach the session state.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Notifications are switched off or permission was denied
    #[error("Notifications are disabled")]
    Disabled,

    /// The platform refused or failed to schedule the notification
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

impl CoreError {
    pub(crate) fn invalid_transition(action: &str, reason: &str) -> Self {
        CoreError::InvalidStateTransition {
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
