//! Configuration checks run by `MachineBuilder::build`.
//!
//! Every check produces a `Validation`, and the results are combined so a
//! single build reports ALL problems instead of stopping at the first one.

use crate::builder::error::ConfigError;
use crate::builder::machine::PendingTransition;
use crate::builder::state::StateBuilder;
use crate::core::{Event, State};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of one configuration check.
pub(crate) type Check = Validation<(), NonEmptyVec<ConfigError>>;

/// Most states a catalog can tag.
pub(crate) const MAX_STATES: usize = u16::MAX as usize;

fn require(ok: bool, error: impl FnOnce() -> ConfigError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

/// Run every configuration check, accumulating all failures.
pub(crate) fn validate<S: State, E: Event>(
    states: &[StateBuilder<S, E>],
    initial: Option<&str>,
    transitions: &[PendingTransition<E>],
) -> Check {
    let names: HashSet<&str> = states.iter().map(|s| s.name.as_str()).collect();
    let mut checks: Vec<Check> = Vec::new();

    checks.push(require(!states.is_empty(), || ConfigError::NoStates));
    checks.push(require(states.len() <= MAX_STATES, || {
        ConfigError::TooManyStates {
            count: states.len(),
            max: MAX_STATES,
        }
    }));
    checks.extend(unique_names(states));
    checks.extend(states.iter().map(|s| {
        require(s.init.is_some() || s.init_with_event.is_some(), || {
            ConfigError::MissingInitializer {
                name: s.name.clone(),
            }
        })
    }));
    checks.push(initial_state(states, &names, initial));
    checks.extend(parents(states, &names));
    checks.extend(transition_references(transitions, &names));
    checks.extend(unique_transitions(transitions));

    Validation::all_vec(checks).map(|_| ())
}

fn unique_names<S: State, E: Event>(states: &[StateBuilder<S, E>]) -> Vec<Check> {
    let mut seen = HashSet::new();
    states
        .iter()
        .map(|s| {
            require(seen.insert(s.name.as_str()), || ConfigError::DuplicateState {
                name: s.name.clone(),
            })
        })
        .collect()
}

fn initial_state<S: State, E: Event>(
    states: &[StateBuilder<S, E>],
    names: &HashSet<&str>,
    initial: Option<&str>,
) -> Check {
    let Some(initial) = initial else {
        return Validation::fail(ConfigError::MissingInitialState);
    };
    if !names.contains(initial) {
        return Validation::fail(ConfigError::UnknownState {
            name: initial.to_string(),
            role: "the initial state".to_string(),
        });
    }
    let has_default = states
        .iter()
        .find(|s| s.name == initial)
        .is_some_and(|s| s.init.is_some());
    require(has_default, || ConfigError::InitialNeedsDefault {
        name: initial.to_string(),
    })
}

fn parents<S: State, E: Event>(
    states: &[StateBuilder<S, E>],
    names: &HashSet<&str>,
) -> Vec<Check> {
    let parent_of: HashMap<&str, &str> = states
        .iter()
        .filter_map(|s| s.parent.as_deref().map(|p| (s.name.as_str(), p)))
        .collect();

    let mut checks = Vec::new();
    for state in states {
        let Some(parent) = state.parent.as_deref() else {
            continue;
        };
        checks.push(require(names.contains(parent), || ConfigError::UnknownState {
            name: parent.to_string(),
            role: format!("the parent of '{}'", state.name),
        }));

        // A walk longer than the number of states can only be a loop.
        let mut cursor = Some(parent);
        let mut steps = 0;
        let mut cyclic = false;
        while let Some(name) = cursor {
            if name == state.name || steps > states.len() {
                cyclic = name == state.name;
                break;
            }
            cursor = parent_of.get(name).copied();
            steps += 1;
        }
        checks.push(require(!cyclic, || ConfigError::ParentCycle {
            name: state.name.clone(),
        }));
    }
    checks
}

fn transition_references<E: Event>(
    transitions: &[PendingTransition<E>],
    names: &HashSet<&str>,
) -> Vec<Check> {
    transitions
        .iter()
        .flat_map(|t| {
            [
                (t.from.as_str(), "a transition source"),
                (t.to.as_str(), "a transition target"),
            ]
        })
        .map(|(name, role)| {
            require(names.contains(name), || ConfigError::UnknownState {
                name: name.to_string(),
                role: role.to_string(),
            })
        })
        .collect()
}

fn unique_transitions<E: Event>(transitions: &[PendingTransition<E>]) -> Vec<Check> {
    let mut seen = HashSet::new();
    transitions
        .iter()
        .map(|t| {
            require(seen.insert((t.from.as_str(), t.kind)), || {
                ConfigError::DuplicateTransition {
                    from: t.from.clone(),
                    event: format!("{:?}", t.kind),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateBuilder;

    #[derive(Debug)]
    enum Phase {
        Idle,
        Busy,
    }

    impl State for Phase {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Kind {
        Go,
        Halt,
    }

    #[derive(Debug)]
    struct Signal(Kind);

    impl Event for Signal {
        type Kind = Kind;
        fn kind(&self) -> Kind {
            self.0
        }
    }

    fn state(name: &str) -> StateBuilder<Phase, Signal> {
        StateBuilder::new(name).init(|| Phase::Idle)
    }

    fn transition(from: &str, kind: Kind, to: &str) -> PendingTransition<Signal> {
        PendingTransition {
            from: from.to_string(),
            kind,
            to: to.to_string(),
            guard: None,
        }
    }

    fn errors(check: Check) -> Vec<ConfigError> {
        match check {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn valid_configuration_passes() {
        let states = vec![state("Idle"), StateBuilder::new("Busy").init(|| Phase::Busy)];
        let transitions = vec![
            transition("Idle", Kind::Go, "Busy"),
            transition("Busy", Kind::Halt, "Idle"),
        ];

        assert!(validate(&states, Some("Idle"), &transitions).is_success());
    }

    #[test]
    fn accumulates_all_violations() {
        let states = vec![state("Idle"), state("Idle"), StateBuilder::new("Busy")];
        let transitions = vec![
            transition("Idle", Kind::Go, "Nowhere"),
            transition("Idle", Kind::Go, "Busy"),
        ];

        let found = errors(validate(&states, None, &transitions));

        assert!(found.contains(&ConfigError::DuplicateState {
            name: "Idle".to_string()
        }));
        assert!(found.contains(&ConfigError::MissingInitializer {
            name: "Busy".to_string()
        }));
        assert!(found.contains(&ConfigError::MissingInitialState));
        assert!(found.iter().any(|e| matches!(
            e,
            ConfigError::UnknownState { name, .. } if name == "Nowhere"
        )));
        assert!(found.iter().any(|e| matches!(
            e,
            ConfigError::DuplicateTransition { from, .. } if from == "Idle"
        )));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let found = errors(validate::<Phase, Signal>(&[], Some("Idle"), &[]));

        assert!(found.contains(&ConfigError::NoStates));
    }

    #[test]
    fn initial_state_needs_default_initializer() {
        let states = vec![StateBuilder::new("Busy").init_with_event(|_: &Signal| Phase::Busy)];

        let found = errors(validate(&states, Some("Busy"), &[]));

        assert_eq!(
            found,
            vec![ConfigError::InitialNeedsDefault {
                name: "Busy".to_string()
            }]
        );
    }

    #[test]
    fn parent_cycles_are_reported() {
        let states = vec![
            state("A").within("B"),
            state("B").within("A"),
            state("C").within("A"),
        ];

        let found = errors(validate(&states, Some("C"), &[]));

        assert!(found.contains(&ConfigError::ParentCycle {
            name: "A".to_string()
        }));
        assert!(found.contains(&ConfigError::ParentCycle {
            name: "B".to_string()
        }));
        assert!(!found.contains(&ConfigError::ParentCycle {
            name: "C".to_string()
        }));
    }

    #[test]
    fn unknown_parent_is_reported() {
        let states = vec![state("Idle").within("Ghost")];

        let found = errors(validate(&states, Some("Idle"), &[]));

        assert!(found.iter().any(|e| matches!(
            e,
            ConfigError::UnknownState { name, .. } if name == "Ghost"
        )));
    }

    #[test]
    fn unknown_initial_state_is_reported() {
        let states = vec![state("Idle")];

        let found = errors(validate(&states, Some("Ghost"), &[]));

        assert_eq!(
            found,
            vec![ConfigError::UnknownState {
                name: "Ghost".to_string(),
                role: "the initial state".to_string(),
            }]
        );
    }

    #[test]
    fn catalog_larger_than_tag_space_is_rejected() {
        let states: Vec<_> = (0..=MAX_STATES).map(|i| state(&format!("S{i}"))).collect();

        let found = errors(validate(&states, Some("S0"), &[]));

        assert_eq!(
            found,
            vec![ConfigError::TooManyStates {
                count: MAX_STATES + 1,
                max: MAX_STATES,
            }]
        );
    }

    #[test]
    fn catalog_filling_tag_space_is_accepted() {
        let states: Vec<_> = (0..MAX_STATES).map(|i| state(&format!("S{i}"))).collect();

        assert!(validate(&states, Some("S0"), &[]).is_success());
    }
}
