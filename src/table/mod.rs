//! The transition table: (source state, event kind) to target state.
//!
//! Built once by the builder after validation and never mutated afterwards.
//! A missing pair is a valid outcome meaning "no transition".

use crate::core::{Event, Guard, StateTag};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One permitted transition.
pub struct TransitionEntry<E: Event> {
    pub source: StateTag,
    pub kind: E::Kind,
    pub target: StateTag,
    pub guard: Option<Guard<E>>,
}

impl<E: Event> TransitionEntry<E> {
    /// Whether this entry claims `event` (pure).
    pub fn admits(&self, event: &E) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(event))
    }
}

impl<E: Event> fmt::Debug for TransitionEntry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEntry")
            .field("source", &self.source)
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Read-only lookup table of transition entries.
pub struct TransitionTable<E: Event> {
    entries: HashMap<(StateTag, E::Kind), TransitionEntry<E>>,
    kinds: HashSet<E::Kind>,
}

impl<E: Event> TransitionTable<E> {
    /// Assemble a table from already-validated entries.
    ///
    /// `declared` lists event kinds that are valid input even though no
    /// entry names them.
    pub(crate) fn from_entries(
        entries: impl IntoIterator<Item = TransitionEntry<E>>,
        declared: impl IntoIterator<Item = E::Kind>,
    ) -> Self {
        let mut kinds: HashSet<E::Kind> = declared.into_iter().collect();
        let mut map = HashMap::new();
        for entry in entries {
            kinds.insert(entry.kind);
            map.entry((entry.source, entry.kind)).or_insert(entry);
        }
        Self { entries: map, kinds }
    }

    /// Target of the entry for `(source, kind)`, ignoring guards.
    pub fn lookup(&self, source: StateTag, kind: E::Kind) -> Option<StateTag> {
        self.entry(source, kind).map(|e| e.target)
    }

    pub fn entry(&self, source: StateTag, kind: E::Kind) -> Option<&TransitionEntry<E>> {
        self.entries.get(&(source, kind))
    }

    /// Whether `kind` is an event kind this machine knows about.
    pub fn classifies(&self, kind: &E::Kind) -> bool {
        self.kinds.contains(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionEntry<E>> {
        self.entries.values()
    }
}
