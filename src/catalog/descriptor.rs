//! Per-state descriptors: how to build, enter and leave one declared state.

use crate::catalog::error::ConstructError;
use crate::core::{Event, State, StateTag};
use std::fmt;

/// Initializer run when a state is entered without an event.
pub type DefaultInit<S> = Box<dyn Fn() -> Result<S, ConstructError> + Send + Sync>;

/// Initializer run when a state is entered by an event.
pub type EventInit<S, E> = Box<dyn Fn(&E) -> Result<S, ConstructError> + Send + Sync>;

/// Activate / deactivate hook, given the live value.
pub type Hook<S> = Box<dyn Fn(&mut S) + Send + Sync>;

/// Everything the machine needs to construct, enter, leave and locate one
/// declared state.
pub struct StateDescriptor<S: State, E: Event> {
    pub(crate) tag: StateTag,
    pub(crate) name: String,
    pub(crate) parent: Option<StateTag>,
    pub(crate) init: Option<DefaultInit<S>>,
    pub(crate) init_with_event: Option<EventInit<S, E>>,
    pub(crate) on_activate: Option<Hook<S>>,
    pub(crate) on_deactivate: Option<Hook<S>>,
}

impl<S: State, E: Event> StateDescriptor<S, E> {
    pub fn tag(&self) -> StateTag {
        self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enclosing state, if this state is nested.
    pub fn parent(&self) -> Option<StateTag> {
        self.parent
    }

    /// Whether the state can be entered without an event.
    pub fn has_default_init(&self) -> bool {
        self.init.is_some()
    }

    /// Build a fresh value of this state.
    ///
    /// Uses the event-consuming initializer when an event is supplied and
    /// one is declared, the default initializer otherwise.
    pub fn construct(&self, event: Option<&E>) -> Result<S, ConstructError> {
        match (event, &self.init_with_event, &self.init) {
            (Some(event), Some(init), _) => init(event),
            (_, _, Some(init)) => init(),
            (None, Some(_), None) => Err(ConstructError::new(format!(
                "state '{}' can only be entered by an event",
                self.name
            ))),
            (_, None, None) => Err(ConstructError::new(format!(
                "state '{}' has no initializer",
                self.name
            ))),
        }
    }

    pub(crate) fn activate(&self, value: &mut S) {
        if let Some(hook) = &self.on_activate {
            hook(value);
        }
    }

    pub(crate) fn deactivate(&self, value: &mut S) {
        if let Some(hook) = &self.on_deactivate {
            hook(value);
        }
    }
}

impl<S: State, E: Event> fmt::Debug for StateDescriptor<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("init", &self.init.is_some())
            .field("init_with_event", &self.init_with_event.is_some())
            .finish()
    }
}
