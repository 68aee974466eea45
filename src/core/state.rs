//! State contract and state tags.
//!
//! A machine's states are the variants of one caller-defined sum type. The
//! catalog assigns each declared variant a [`StateTag`] and uses
//! [`State::name`] to check that a constructed value really is the variant
//! its tag claims.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for the sum type holding a machine's state values.
///
/// Each declared state corresponds to one variant. `name` must return the
/// same string the variant was declared under in the catalog.
///
/// # Example
///
/// ```rust
/// use statecell::core::State;
///
/// #[derive(Debug)]
/// enum Job {
///     Idle,
///     Running { pid: u32 },
///     Stopped,
/// }
///
/// impl State for Job {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Running { .. } => "Running",
///             Self::Stopped => "Stopped",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Stopped)
///     }
/// }
///
/// assert_eq!(Job::Running { pid: 7 }.name(), "Running");
/// assert!(Job::Stopped.is_final());
/// ```
pub trait State: Debug {
    /// Name of the variant this value belongs to.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Identifier of one declared state, assigned in declaration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct StateTag(u16);

impl StateTag {
    pub(crate) fn new(index: u16) -> Self {
        Self(index)
    }

    /// Position of the state in the catalog.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
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

    #[test]
    fn state_name_ignores_payload() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing(1).name(), "Processing");
        assert_eq!(TestState::Processing(99).name(), "Processing");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Initial.is_final());
        assert!(!TestState::Processing(0).is_final());
        assert!(TestState::Complete.is_final());
    }

    #[test]
    fn tags_order_by_declaration_index() {
        let first = StateTag::new(0);
        let second = StateTag::new(1);

        assert!(first < second);
        assert_eq!(second.index(), 1);
        assert_eq!(second.to_string(), "#1");
    }

    #[test]
    fn tag_serializes_correctly() {
        let tag = StateTag::new(3);
        let json = serde_json::to_string(&tag).unwrap();
        let deserialized: StateTag = serde_json::from_str(&json).unwrap();
        assert_eq!(tag, deserialized);
    }
}
