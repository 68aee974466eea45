//! Initializer failure type.

use thiserror::Error;

/// Failure reported by a state initializer.
///
/// Returned from `try_init` / `try_init_with_event` closures when the target
/// state cannot be built from what it was given.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConstructError {
    message: String,
}

impl ConstructError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
