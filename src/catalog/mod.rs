//! The state catalog: an ordered registry of declared states.
//!
//! Tags are assigned in declaration order and never change. The catalog is
//! built and validated by [`MachineBuilder`](crate::builder::MachineBuilder);
//! afterwards it is read-only.

mod descriptor;
mod error;

pub use descriptor::{DefaultInit, EventInit, Hook, StateDescriptor};
pub use error::ConstructError;

use crate::core::{Event, State, StateTag};
use std::collections::HashMap;
use std::mem;

/// Ordered registry of state descriptors.
pub struct StateCatalog<S: State, E: Event> {
    descriptors: Vec<StateDescriptor<S, E>>,
    by_name: HashMap<String, StateTag>,
}

impl<S: State, E: Event> StateCatalog<S, E> {
    /// Assemble a catalog from descriptors whose tags equal their position.
    pub(crate) fn from_descriptors(descriptors: Vec<StateDescriptor<S, E>>) -> Self {
        let by_name = descriptors
            .iter()
            .map(|d| (d.name.clone(), d.tag))
            .collect();
        Self {
            descriptors,
            by_name,
        }
    }

    /// Tag of the state declared under `name`.
    pub fn tag_of(&self, name: &str) -> Option<StateTag> {
        self.by_name.get(name).copied()
    }

    pub fn descriptor(&self, tag: StateTag) -> Option<&StateDescriptor<S, E>> {
        self.descriptors.get(tag.index())
    }

    /// Descriptor for a tag issued by this catalog.
    ///
    /// Machines only ever hold tags minted by their own catalog, so the
    /// index is always in range.
    pub(crate) fn get(&self, tag: StateTag) -> &StateDescriptor<S, E> {
        &self.descriptors[tag.index()]
    }

    pub fn name_of(&self, tag: StateTag) -> Option<&str> {
        self.descriptor(tag).map(StateDescriptor::name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &StateDescriptor<S, E>> {
        self.descriptors.iter()
    }

    /// Size in bytes of the slot that holds any declared state.
    pub fn max_size(&self) -> usize {
        mem::size_of::<S>()
    }

    /// Alignment of the slot that holds any declared state.
    pub fn max_align(&self) -> usize {
        mem::align_of::<S>()
    }

    /// Walk from `tag` outward through its enclosing states.
    ///
    /// The first item is `tag` itself; iteration ends once a state without
    /// a parent has been yielded.
    pub fn ancestry(&self, tag: StateTag) -> Ancestry<'_, S, E> {
        Ancestry {
            catalog: self,
            next: self.descriptor(tag).map(StateDescriptor::tag),
        }
    }

    /// Whether `ancestor` is `tag` or one of its enclosing states.
    pub fn is_within(&self, tag: StateTag, ancestor: StateTag) -> bool {
        self.ancestry(tag).any(|t| t == ancestor)
    }
}

/// Iterator returned by [`StateCatalog::ancestry`].
pub struct Ancestry<'a, S: State, E: Event> {
    catalog: &'a StateCatalog<S, E>,
    next: Option<StateTag>,
}

impl<S: State, E: Event> Iterator for Ancestry<'_, S, E> {
    type Item = StateTag;

    fn next(&mut self) -> Option<StateTag> {
        let current = self.next?;
        self.next = self
            .catalog
            .descriptor(current)
            .and_then(StateDescriptor::parent);
        Some(current)
    }
}
