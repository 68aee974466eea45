//! Guard predicates over event payloads.
//!
//! A guard narrows a transition entry: the entry only claims an event when
//! the guard admits it. A rejected event keeps looking outward through the
//! active state's ancestors, the same as a missing entry.

use super::event::Event;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition entry claims an event.
///
/// # Example
///
/// ```rust
/// use statecell::core::{Event, Guard};
///
/// #[derive(Debug)]
/// struct Reading(i32);
///
/// impl Event for Reading {
///     type Kind = ();
///     fn kind(&self) {}
/// }
///
/// let too_hot = Guard::new(|r: &Reading| r.0 > 30);
///
/// assert!(too_hot.check(&Reading(35)));
/// assert!(!too_hot.check(&Reading(20)));
/// ```
pub struct Guard<E: Event> {
    predicate: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E: Event> Guard<E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard admits this event.
    pub fn check(&self, event: &E) -> bool {
        (self.predicate)(event)
    }
}

impl<E: Event> Clone for Guard<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E: Event> fmt::Debug for Guard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Kind {
        Deposit,
        Withdraw,
    }

    #[derive(Debug)]
    enum Txn {
        Deposit(u64),
        Withdraw(u64),
    }

    impl Event for Txn {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Self::Deposit(_) => Kind::Deposit,
                Self::Withdraw(_) => Kind::Withdraw,
            }
        }
    }

    #[test]
    fn guard_inspects_payload() {
        let large = Guard::new(|t: &Txn| match t {
            Txn::Deposit(n) | Txn::Withdraw(n) => *n >= 1000,
        });

        assert!(large.check(&Txn::Deposit(1000)));
        assert!(!large.check(&Txn::Withdraw(5)));
    }

    #[test]
    fn guard_can_match_on_kind() {
        let deposits_only = Guard::new(|t: &Txn| t.kind() == Kind::Deposit);

        assert!(deposits_only.check(&Txn::Deposit(1)));
        assert!(!deposits_only.check(&Txn::Withdraw(1)));
    }

    #[test]
    fn guard_is_deterministic() {
        let event = Txn::Withdraw(40);
        let guard = Guard::new(|t: &Txn| matches!(t, Txn::Withdraw(n) if *n < 50));

        assert_eq!(guard.check(&event), guard.check(&event));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|t: &Txn| matches!(t, Txn::Deposit(_)));
        let cloned = guard.clone();

        assert_eq!(guard.check(&Txn::Deposit(3)), cloned.check(&Txn::Deposit(3)));
        assert_eq!(format!("{:?}", cloned), "Guard(..)");
    }
}
