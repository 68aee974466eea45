//! Runtime errors returned by machine operations.

use crate::catalog::ConstructError;
use thiserror::Error;

/// Errors returned by `initialize`, `react` and `update`.
///
/// An event with no matching transition is not an error; see
/// [`Reaction::Ignored`](crate::machine::Reaction::Ignored).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Machine is already active in state '{state}'")]
    AlreadyInitialized { state: String },

    #[error("Machine is not initialized. Call .initialize() first")]
    NotInitialized,

    #[error("Machine faulted while entering '{to}' from '{from}'. Call .teardown() to reset")]
    Faulted { from: String, to: String },

    #[error("Event kind {kind} is not known to this machine")]
    UnknownEvent { kind: String },

    #[error("Failed to construct state '{state}': {source}")]
    ConstructionFailed {
        state: String,
        #[source]
        source: ConstructError,
    },

    #[error("State '{state}' was replaced by a value of state '{found}'")]
    VariantMismatch { state: String, found: String },
}

impl MachineError {
    /// Whether the operation was rejected without touching the machine.
    pub fn is_invalid_operation(&self) -> bool {
        !matches!(
            self,
            Self::ConstructionFailed { .. } | Self::VariantMismatch { .. }
        )
    }
}
