//! Event contract.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values fed to [`Machine::react`](crate::machine::Machine::react).
///
/// Transitions are keyed on the event's kind, not its payload. The payload is
/// only seen by guards and by event-consuming initializers.
///
/// # Example
///
/// ```rust
/// use statecell::core::Event;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Kind {
///     Start,
///     Finish,
/// }
///
/// #[derive(Debug)]
/// enum Command {
///     Start { pid: u32 },
///     Finish,
/// }
///
/// impl Event for Command {
///     type Kind = Kind;
///
///     fn kind(&self) -> Kind {
///         match self {
///             Self::Start { .. } => Kind::Start,
///             Self::Finish => Kind::Finish,
///         }
///     }
/// }
///
/// assert_eq!(Command::Start { pid: 1 }.kind(), Kind::Start);
/// ```
pub trait Event: Debug {
    /// Classification used as the transition table key.
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Kind of this event.
    fn kind(&self) -> Self::Kind;
}
