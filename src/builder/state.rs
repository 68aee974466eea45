//! Builder for declaring one state.

use crate::catalog::{ConstructError, DefaultInit, EventInit, Hook};
use crate::core::{Event, State};

/// Fluent declaration of one state: its initializers, hooks and parent.
///
/// At least one initializer is required; that is checked when the machine
/// is built so every problem is reported together.
pub struct StateBuilder<S: State, E: Event> {
    pub(crate) name: String,
    pub(crate) parent: Option<String>,
    pub(crate) init: Option<DefaultInit<S>>,
    pub(crate) init_with_event: Option<EventInit<S, E>>,
    pub(crate) on_activate: Option<Hook<S>>,
    pub(crate) on_deactivate: Option<Hook<S>>,
}

impl<S: State + 'static, E: Event + 'static> StateBuilder<S, E> {
    /// Start declaring the state named `name`.
    ///
    /// Values built for this state must report the same name from
    /// [`State::name`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            init: None,
            init_with_event: None,
            on_activate: None,
            on_deactivate: None,
        }
    }

    /// Initializer used when entered without an event, or by an event when
    /// no event initializer is set.
    pub fn init<F>(self, init: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.try_init(move || Ok(init()))
    }

    /// Fallible form of [`init`](Self::init).
    pub fn try_init<F>(mut self, init: F) -> Self
    where
        F: Fn() -> Result<S, ConstructError> + Send + Sync + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }

    /// Initializer that consumes the triggering event.
    pub fn init_with_event<F>(self, init: F) -> Self
    where
        F: Fn(&E) -> S + Send + Sync + 'static,
    {
        self.try_init_with_event(move |event| Ok(init(event)))
    }

    /// Fallible form of [`init_with_event`](Self::init_with_event).
    pub fn try_init_with_event<F>(mut self, init: F) -> Self
    where
        F: Fn(&E) -> Result<S, ConstructError> + Send + Sync + 'static,
    {
        self.init_with_event = Some(Box::new(init));
        self
    }

    /// Hook run right after the state is constructed.
    pub fn on_activate<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        self.on_activate = Some(Box::new(hook));
        self
    }

    /// Hook run right before the state is destroyed.
    pub fn on_deactivate<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        self.on_deactivate = Some(Box::new(hook));
        self
    }

    /// Nest this state inside `parent`; the parent's transitions then apply
    /// here whenever this state declares none for an event.
    pub fn within(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Valve {
        Shut,
        Flowing(u32),
    }

    impl State for Valve {
        fn name(&self) -> &str {
            match self {
                Self::Shut => "Shut",
                Self::Flowing(_) => "Flowing",
            }
        }
    }

    #[derive(Debug)]
    struct SetRate(u32);

    impl Event for SetRate {
        type Kind = ();
        fn kind(&self) {}
    }

    #[test]
    fn builder_records_initializers() {
        let state: StateBuilder<Valve, SetRate> = StateBuilder::new("Flowing")
            .init(|| Valve::Flowing(0))
            .init_with_event(|e: &SetRate| Valve::Flowing(e.0));

        let init = state.init.as_ref().unwrap();
        assert_eq!(init().unwrap(), Valve::Flowing(0));

        let with_event = state.init_with_event.as_ref().unwrap();
        assert_eq!(with_event(&SetRate(12)).unwrap(), Valve::Flowing(12));
    }

    #[test]
    fn fallible_initializer_surfaces_error() {
        let state: StateBuilder<Valve, SetRate> =
            StateBuilder::new("Flowing").try_init_with_event(|e: &SetRate| {
                if e.0 > 100 {
                    Err(ConstructError::new("rate too high"))
                } else {
                    Ok(Valve::Flowing(e.0))
                }
            });

        let init = state.init_with_event.as_ref().unwrap();
        assert!(init(&SetRate(500)).is_err());
        assert!(state.init.is_none());
    }

    #[test]
    fn within_records_parent_name() {
        let state: StateBuilder<Valve, SetRate> = StateBuilder::new("Shut")
            .init(|| Valve::Shut)
            .within("Closed");

        assert_eq!(state.parent.as_deref(), Some("Closed"));
        assert_eq!(state.name(), "Shut");
    }
}
