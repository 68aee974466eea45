//! Snapshot and restore of a machine's live state.
//!
//! The engine defines no wire format of its own. A [`Snapshot`] is a plain
//! serde value; the JSON and binary helpers delegate to `serde_json` and
//! `bincode`. Initializers, hooks and guards are not part of a snapshot and
//! come from the machine declaration the snapshot is restored into.

use crate::core::{Event, State, StateHistory, StateTag};
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a machine's live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Name of the machine the snapshot was taken from
    pub machine: String,

    /// Tag of the live state
    pub tag: StateTag,

    /// Catalog name of the live state
    pub state_name: String,

    /// Copy of the live state value
    pub value: S,

    /// Transition history at the time of the snapshot
    pub history: StateHistory,
}

impl<S: Serialize> Snapshot<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }
}

impl<S: DeserializeOwned> Snapshot<S> {
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<S: State + Clone, E: Event> Machine<S, E> {
    /// Copy the live state. Returns `None` unless a state is active.
    pub fn snapshot(&self) -> Option<Snapshot<S>> {
        let tag = self.current()?;
        let value = self.state()?.clone();
        Some(Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            machine: self.name.clone(),
            tag,
            state_name: self.descriptor(tag).name().to_string(),
            value,
            history: self.history.clone(),
        })
    }

    /// Make the snapshot's value the live state of this uninitialized
    /// machine.
    ///
    /// The value is placed as-is (no initializer runs) and the state's
    /// activate hook is called. The snapshot's history replaces the
    /// machine's own. If the hook swaps in another state's value, the value
    /// is dropped and the machine stays uninitialized.
    pub fn restore(&mut self, snapshot: Snapshot<S>) -> Result<(), CheckpointError> {
        self.ensure_uninitialized()?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        let descriptor = self.catalog.descriptor(snapshot.tag).ok_or_else(|| {
            CheckpointError::ValidationFailed(format!("unknown state tag {}", snapshot.tag))
        })?;
        if descriptor.name() != snapshot.state_name {
            return Err(CheckpointError::ValidationFailed(format!(
                "tag {} is '{}' here but '{}' in the snapshot",
                snapshot.tag,
                descriptor.name(),
                snapshot.state_name
            )));
        }
        if snapshot.value.name() != snapshot.state_name {
            return Err(CheckpointError::ValidationFailed(format!(
                "value is '{}' but the snapshot claims '{}'",
                snapshot.value.name(),
                snapshot.state_name
            )));
        }

        self.cell.place(snapshot.value);
        self.cell.activate(descriptor)?;
        self.activation.activate(snapshot.tag);
        self.history = snapshot.history;

        debug!(
            machine = %self.name,
            state = %snapshot.state_name,
            id = %snapshot.id,
            "restored"
        );
        Ok(())
    }
}
