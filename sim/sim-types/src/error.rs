//! Error types for evaluation inputs.

use thiserror::Error;

/// Errors raised when evaluation inputs break their contract.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A snapshot or scene reference is malformed.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// Description of what is malformed.
        reason: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl SimError {
    /// Create an invalid snapshot error.
    #[must_use]
    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this is a malformed-input error.
    #[must_use]
    pub fn is_invalid_snapshot(&self) -> bool {
        matches!(self, Self::InvalidSnapshot { .. })
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
