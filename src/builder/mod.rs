//! Configuration surface: fluent builders and macros for declaring machines.
//!
//! A machine is declared once, validated as a whole, and is read-only
//! afterwards. `build()` collects every configuration error before returning.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
mod validate;

pub use error::{BuildError, ConfigError};
pub use machine::MachineBuilder;
pub use state::StateBuilder;

use crate::core::{Event, State};

/// Declare a state built by `init`, entered the same way with or without an
/// event.
///
/// # Example
///
/// ```
/// use statecell::builder::simple_state;
/// use statecell::state_enum;
///
/// state_enum! {
///     enum Gate {
///         Open,
///         Shut,
///     }
/// }
///
/// #[derive(Debug)]
/// struct Push;
///
/// impl statecell::core::Event for Push {
///     type Kind = ();
///     fn kind(&self) {}
/// }
///
/// let open = simple_state::<Gate, Push, _>("Open", || Gate::Open);
/// assert_eq!(open.name(), "Open");
/// ```
pub fn simple_state<S, E, F>(name: impl Into<String>, init: F) -> StateBuilder<S, E>
where
    S: State + 'static,
    E: Event + 'static,
    F: Fn() -> S + Send + Sync + 'static,
{
    StateBuilder::new(name).init(init)
}
