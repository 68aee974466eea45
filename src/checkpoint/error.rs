//! Snapshot error types.

use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur while taking, encoding or restoring a snapshot.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot does not describe a state of this machine
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),

    /// The machine refused the restore
    #[error(transparent)]
    Machine(#[from] MachineError),
}
