//! The single slot holding the live state value.

use crate::catalog::{ConstructError, StateDescriptor};
use crate::core::{Event, State};
use crate::machine::error::MachineError;
use std::alloc::Layout;

/// Storage for at most one live state value.
///
/// The slot is the caller's state sum type, so the compiler sizes and aligns
/// it for the largest declared variant and drops whatever payload is live.
#[derive(Debug)]
pub struct StorageCell<S: State> {
    slot: Option<S>,
}

impl<S: State> Default for StorageCell<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StorageCell<S> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Layout of the value slot.
    pub fn capacity(&self) -> Layout {
        Layout::new::<S>()
    }

    pub fn is_vacant(&self) -> bool {
        self.slot.is_none()
    }

    pub fn get(&self) -> Option<&S> {
        self.slot.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut S> {
        self.slot.as_mut()
    }

    /// Build the descriptor's state in the vacant slot.
    ///
    /// A value whose name does not match the descriptor is dropped and
    /// reported as a construction failure, leaving the slot vacant.
    pub fn construct<E: Event>(
        &mut self,
        descriptor: &StateDescriptor<S, E>,
        event: Option<&E>,
    ) -> Result<&mut S, ConstructError> {
        debug_assert!(self.is_vacant(), "construct into an occupied cell");
        let value = descriptor.construct(event)?;
        if value.name() != descriptor.name() {
            return Err(ConstructError::new(format!(
                "initializer for '{}' produced '{}'",
                descriptor.name(),
                value.name()
            )));
        }
        Ok(self.place(value))
    }

    /// Put an already-built value in the vacant slot.
    pub(crate) fn place(&mut self, value: S) -> &mut S {
        debug_assert!(self.is_vacant(), "place into an occupied cell");
        self.slot.insert(value)
    }

    /// Run the descriptor's activate hook on the live value.
    ///
    /// Fails if the hook swapped in another state's value; that value is
    /// dropped and the slot left vacant.
    pub(crate) fn activate<E: Event>(
        &mut self,
        descriptor: &StateDescriptor<S, E>,
    ) -> Result<(), MachineError> {
        if let Some(value) = self.slot.as_mut() {
            descriptor.activate(value);
        }
        self.verify(descriptor)
    }

    /// Run the descriptor's deactivate hook, then drop the live value.
    ///
    /// The value is dropped either way. The error reports a hook that
    /// swapped in another state's value.
    pub(crate) fn retire<E: Event>(
        &mut self,
        descriptor: &StateDescriptor<S, E>,
    ) -> Result<(), MachineError> {
        if let Some(value) = self.slot.as_mut() {
            descriptor.deactivate(value);
        }
        let verified = self.verify(descriptor);
        self.destroy();
        verified
    }

    /// Confirm the live value is the descriptor's state.
    ///
    /// A value of any other state is dropped, leaving the slot vacant.
    pub(crate) fn verify<E: Event>(
        &mut self,
        descriptor: &StateDescriptor<S, E>,
    ) -> Result<(), MachineError> {
        let found = match &self.slot {
            Some(value) if value.name() != descriptor.name() => value.name().to_string(),
            _ => return Ok(()),
        };
        self.destroy();
        Err(MachineError::VariantMismatch {
            state: descriptor.name().to_string(),
            found,
        })
    }

    /// Drop the live value, if any. Returns whether one was dropped.
    pub fn destroy(&mut self) -> bool {
        self.slot.take().is_some()
    }
}
