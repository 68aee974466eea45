//! Builder for constructing state machines.

use crate::builder::error::{BuildError, ConfigError};
use crate::builder::state::StateBuilder;
use crate::builder::validate::validate;
use crate::catalog::{StateCatalog, StateDescriptor};
use crate::core::{Event, Guard, State, StateHistory, StateTag};
use crate::machine::Machine;
use crate::table::{TransitionEntry, TransitionTable};
use std::collections::HashMap;
use stillwater::validation::Validation;

/// A transition as declared, before names are resolved to tags.
pub(crate) struct PendingTransition<E: Event> {
    pub(crate) from: String,
    pub(crate) kind: E::Kind,
    pub(crate) to: String,
    pub(crate) guard: Option<Guard<E>>,
}

/// Builder for constructing state machines with a fluent API.
///
/// Nothing is checked until [`build`](Self::build), which reports every
/// configuration problem at once.
///
/// # Example
///
/// ```rust
/// use statecell::builder::{MachineBuilder, StateBuilder};
/// use statecell::core::{Event, State};
///
/// #[derive(Debug)]
/// enum Lamp {
///     Off,
///     On,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///         }
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// struct Toggle;
///
/// impl Event for Toggle {
///     type Kind = Toggle;
///     fn kind(&self) -> Toggle {
///         *self
///     }
/// }
///
/// let mut lamp = MachineBuilder::new()
///     .state(StateBuilder::new("Off").init(|| Lamp::Off))
///     .state(StateBuilder::new("On").init(|| Lamp::On))
///     .initial("Off")
///     .transition("Off", Toggle, "On")
///     .transition("On", Toggle, "Off")
///     .build()
///     .unwrap();
///
/// lamp.initialize().unwrap();
/// lamp.react(&Toggle).unwrap();
/// assert_eq!(lamp.current_name(), Some("On"));
/// ```
pub struct MachineBuilder<S: State, E: Event> {
    name: String,
    states: Vec<StateBuilder<S, E>>,
    initial: Option<String>,
    transitions: Vec<PendingTransition<E>>,
    events: Vec<E::Kind>,
    history_limit: Option<usize>,
}

impl<S: State + 'static, E: Event + 'static> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: "machine".to_string(),
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            events: Vec::new(),
            history_limit: None,
        }
    }

    /// Label used in log output.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare a state. Tags follow declaration order.
    pub fn state(mut self, state: StateBuilder<S, E>) -> Self {
        self.states.push(state);
        self
    }

    /// Declare several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = StateBuilder<S, E>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Permit `from --kind--> to`.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        kind: E::Kind,
        to: impl Into<String>,
    ) -> Self {
        self.transitions.push(PendingTransition {
            from: from.into(),
            kind,
            to: to.into(),
            guard: None,
        });
        self
    }

    /// Permit `from --kind--> to` only for events the guard admits.
    pub fn transition_when(
        mut self,
        from: impl Into<String>,
        kind: E::Kind,
        to: impl Into<String>,
        guard: Guard<E>,
    ) -> Self {
        self.transitions.push(PendingTransition {
            from: from.into(),
            kind,
            to: to.into(),
            guard: Some(guard),
        });
        self
    }

    /// Declare an event kind the machine accepts even though no transition
    /// uses it. Undeclared kinds are rejected by `react`.
    pub fn event(mut self, kind: E::Kind) -> Self {
        self.events.push(kind);
        self
    }

    /// Keep at most `limit` transition records. Zero disables history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the state machine.
    ///
    /// Returns every configuration problem found if any check fails.
    pub fn build(self) -> Result<Machine<S, E>, BuildError> {
        if let Validation::Failure(errors) =
            validate(&self.states, self.initial.as_deref(), &self.transitions)
        {
            return Err(BuildError {
                errors: errors.iter().cloned().collect(),
            });
        }

        let tags: HashMap<String, StateTag> = (0u16..)
            .zip(&self.states)
            .map(|(index, state)| (state.name.clone(), StateTag::new(index)))
            .collect();
        let resolve = |name: &str| tags.get(name).copied();

        let initial = self
            .initial
            .as_deref()
            .and_then(resolve)
            .ok_or_else(|| BuildError {
                errors: vec![ConfigError::MissingInitialState],
            })?;

        let descriptors = (0u16..)
            .zip(self.states)
            .map(|(index, state)| StateDescriptor {
                tag: StateTag::new(index),
                parent: state.parent.as_deref().and_then(resolve),
                name: state.name,
                init: state.init,
                init_with_event: state.init_with_event,
                on_activate: state.on_activate,
                on_deactivate: state.on_deactivate,
            })
            .collect();

        let entries = self.transitions.into_iter().filter_map(|t| {
            Some(TransitionEntry {
                source: resolve(t.from.as_str())?,
                kind: t.kind,
                target: resolve(t.to.as_str())?,
                guard: t.guard,
            })
        });
        let table = TransitionTable::from_entries(entries, self.events);

        Ok(Machine::new(
            self.name,
            StateCatalog::from_descriptors(descriptors),
            table,
            initial,
            StateHistory::with_limit(self.history_limit),
        ))
    }
}

impl<S: State + 'static, E: Event + 'static> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Reaction;

    #[derive(Debug, PartialEq)]
    enum TestState {
        Initial,
        Processing(u32),
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing(_) => "Processing",
                Self::Complete => "Complete",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Complete)
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Kind {
        Begin,
        End,
        Poll,
    }

    #[derive(Debug)]
    enum Step {
        Begin(u32),
        End,
        Poll,
    }

    impl Event for Step {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Self::Begin(_) => Kind::Begin,
                Self::End => Kind::End,
                Self::Poll => Kind::Poll,
            }
        }
    }

    fn states() -> Vec<StateBuilder<TestState, Step>> {
        vec![
            StateBuilder::new("Initial").init(|| TestState::Initial),
            StateBuilder::new("Processing").init_with_event(|e: &Step| match e {
                Step::Begin(n) => TestState::Processing(*n),
                _ => TestState::Processing(0),
            }),
            StateBuilder::new("Complete").init(|| TestState::Complete),
        ]
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = MachineBuilder::<TestState, Step>::new().build();

        let err = result.err().unwrap();
        assert!(err.contains(|e| matches!(e, ConfigError::NoStates)));
        assert!(err.contains(|e| matches!(e, ConfigError::MissingInitialState)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = MachineBuilder::new()
            .name("pipeline")
            .states(states())
            .initial("Initial")
            .transition("Initial", Kind::Begin, "Processing")
            .transition("Processing", Kind::End, "Complete")
            .build()
            .unwrap();

        assert_eq!(machine.name(), "pipeline");
        assert_eq!(machine.catalog().len(), 3);
        assert_eq!(machine.table().len(), 2);
        assert_eq!(machine.current(), None);
        assert_eq!(
            machine.catalog().name_of(machine.initial()),
            Some("Initial")
        );
    }

    #[test]
    fn duplicate_transition_is_a_build_error() {
        let result = MachineBuilder::new()
            .states(states())
            .initial("Initial")
            .transition("Initial", Kind::Begin, "Processing")
            .transition("Initial", Kind::Begin, "Complete")
            .build();

        let err = result.err().unwrap();
        assert_eq!(
            err.errors,
            vec![ConfigError::DuplicateTransition {
                from: "Initial".to_string(),
                event: "Begin".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_target_is_a_build_error() {
        let result = MachineBuilder::new()
            .states(states())
            .initial("Initial")
            .transition("Initial", Kind::Begin, "Paused")
            .build();

        assert!(result.err().unwrap().contains(
            |e| matches!(e, ConfigError::UnknownState { name, .. } if name == "Paused")
        ));
    }

    #[test]
    fn unknown_initial_state_is_a_build_error() {
        let result = MachineBuilder::new()
            .states(states())
            .initial("Ghost")
            .transition("Initial", Kind::Begin, "Processing")
            .build();

        let err = result.err().unwrap();
        assert_eq!(
            err.errors,
            vec![ConfigError::UnknownState {
                name: "Ghost".to_string(),
                role: "the initial state".to_string(),
            }]
        );
    }

    #[test]
    fn declared_event_is_accepted_without_transitions() {
        let mut machine = MachineBuilder::new()
            .states(states())
            .initial("Initial")
            .transition("Initial", Kind::Begin, "Processing")
            .event(Kind::Poll)
            .build()
            .unwrap();

        machine.initialize().unwrap();

        assert_eq!(machine.react(&Step::Poll), Ok(Reaction::Ignored));
        assert!(machine.react(&Step::End).is_err());
    }

    #[test]
    fn history_limit_is_applied() {
        let machine = MachineBuilder::new()
            .states(states())
            .initial("Initial")
            .transition("Initial", Kind::Begin, "Processing")
            .history_limit(4)
            .build()
            .unwrap();

        assert_eq!(machine.history().limit(), Some(4));
    }
}
