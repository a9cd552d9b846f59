//! Error types for task descriptors and the registry.

use sim_types::SimError;
use thiserror::Error;

/// Errors raised while building, registering or looking up tasks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TaskError {
    /// No task is registered under this name.
    #[error("unknown task: {name}")]
    UnknownTask {
        /// Requested task name.
        name: String,
    },

    /// A task with this name is already registered.
    #[error("duplicate task: {name}")]
    DuplicateTask {
        /// Conflicting task name.
        name: String,
    },

    /// A descriptor failed validation.
    #[error("invalid task descriptor '{name}': {reason}")]
    InvalidDescriptor {
        /// Task name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A task table could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Evaluation configuration error.
    #[error(transparent)]
    Sim(#[from] SimError),
}

impl TaskError {
    /// Create an unknown task error.
    #[must_use]
    pub fn unknown_task(name: impl Into<String>) -> Self {
        Self::UnknownTask { name: name.into() }
    }

    /// Create a duplicate task error.
    #[must_use]
    pub fn duplicate_task(name: impl Into<String>) -> Self {
        Self::DuplicateTask { name: name.into() }
    }

    /// Create an invalid descriptor error.
    #[must_use]
    pub fn invalid_descriptor(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a lookup failure.
    #[must_use]
    pub fn is_unknown_task(&self) -> bool {
        matches!(self, Self::UnknownTask { .. })
    }

    /// Check if this is a descriptor validation failure.
    #[must_use]
    pub fn is_invalid_descriptor(&self) -> bool {
        matches!(self, Self::InvalidDescriptor { .. })
    }
}

impl From<serde_json::Error> for TaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskError::unknown_task("PutMugOnShelf-v0");
        assert_eq!(err.to_string(), "unknown task: PutMugOnShelf-v0");
        assert!(err.is_unknown_task());

        let err = TaskError::invalid_descriptor("t", "no layouts");
        assert_eq!(err.to_string(), "invalid task descriptor 't': no layouts");
        assert!(err.is_invalid_descriptor());
    }

    #[test]
    fn test_from_sim_error() {
        let err: TaskError = SimError::invalid_config("bad tolerance").into();
        assert!(err.to_string().contains("bad tolerance"));
        assert!(!err.is_unknown_task());
    }

    #[test]
    fn test_from_json_error() {
        let err: TaskError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, TaskError::Parse(_)));
    }
}
