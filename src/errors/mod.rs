//! Common error types for the Vuex value utilities
//!
//! Assertion failures get their own type so callers can tell a broken
//! precondition apart from the other, recoverable value errors.

use thiserror::Error;

/// Marker prefixed to every precondition failure raised by this crate
pub const NAMESPACE: &str = "[vuex]";

/// A caller-relied-upon invariant did not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[vuex] {message}")]
pub struct PreconditionError {
    message: String,
}

impl PreconditionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The caller-supplied message, without the namespace marker
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while building, copying or converting values
#[derive(Error, Debug)]
pub enum ValueError {
    /// Assertion failure
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Nesting deeper than the configured copy limit
    #[error("Maximum copy depth of {0} exceeded")]
    DepthExceeded(usize),

    /// Pattern source or flags rejected
    #[error("Invalid pattern '{0}': {1}")]
    InvalidPattern(String, String),

    /// Timestamp outside the representable range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Circular value graph where a tree is required
    #[error("Circular structure cannot be converted to {0}")]
    CircularStructure(String),

    /// Value kind the target representation cannot hold
    #[error("Cannot convert {0} to {1}")]
    Unsupported(String, String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for '{0}': {1}")]
    InvalidValue(String, String),

    /// Configuration document error
    #[error("Configuration file error: {0}")]
    FileError(String),
}
