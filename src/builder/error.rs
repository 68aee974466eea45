//! Configuration errors reported by the machine builder.

use thiserror::Error;

/// One problem found in a machine declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No states declared. Add at least one state with .state(...)")]
    NoStates,

    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("State '{name}' has no initializer. Call .init(...) or .init_with_event(...)")]
    MissingInitializer { name: String },

    #[error("Unknown state '{name}' referenced as {role}")]
    UnknownState { name: String, role: String },

    #[error("Initial state '{name}' cannot be entered without an event. Give it .init(...)")]
    InitialNeedsDefault { name: String },

    #[error("Transition from '{from}' on {event} is declared more than once")]
    DuplicateTransition { from: String, event: String },

    #[error("State '{name}' is nested inside itself")]
    ParentCycle { name: String },

    #[error("Too many states declared ({count}); at most {max} are supported")]
    TooManyStates { count: usize, max: usize },
}

/// Every configuration problem found by a single `build()` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid machine configuration: {}", summary(.errors))]
pub struct BuildError {
    pub errors: Vec<ConfigError>,
}

impl BuildError {
    /// Whether `predicate` matches any of the collected errors.
    pub fn contains(&self, predicate: impl Fn(&ConfigError) -> bool) -> bool {
        self.errors.iter().any(predicate)
    }
}

fn summary(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
