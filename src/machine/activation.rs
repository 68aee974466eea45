//! Tracks which state, if any, is live in the storage cell.

use crate::core::StateTag;
use serde::{Deserialize, Serialize};

/// Activation status of a machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// No state is live.
    #[default]
    Uninitialized,

    /// The tagged state is live in the cell.
    Active(StateTag),

    /// A transition destroyed `from` but never finished entering `to`.
    /// The cell is vacant.
    Faulted { from: StateTag, to: StateTag },
}

impl Activation {
    /// The live state, if any.
    pub fn current(self) -> Option<StateTag> {
        match self {
            Self::Active(tag) => Some(tag),
            Self::Uninitialized | Self::Faulted { .. } => None,
        }
    }

    /// Whether `tag` is the live state.
    pub fn is_active(self, tag: StateTag) -> bool {
        self.current() == Some(tag)
    }

    pub fn is_faulted(self) -> bool {
        matches!(self, Self::Faulted { .. })
    }

    pub(crate) fn activate(&mut self, tag: StateTag) {
        *self = Self::Active(tag);
    }

    pub(crate) fn fault(&mut self, from: StateTag, to: StateTag) {
        *self = Self::Faulted { from, to };
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let activation = Activation::default();
        assert_eq!(activation.current(), None);
        assert!(!activation.is_faulted());
    }

    #[test]
    fn is_active_matches_only_live_tag() {
        let mut activation = Activation::default();
        activation.activate(StateTag::new(2));

        assert!(activation.is_active(StateTag::new(2)));
        assert!(!activation.is_active(StateTag::new(1)));
    }

    #[test]
    fn faulted_has_no_live_tag() {
        let mut activation = Activation::default();
        activation.activate(StateTag::new(0));
        activation.fault(StateTag::new(0), StateTag::new(1));

        assert_eq!(activation.current(), None);
        assert!(!activation.is_active(StateTag::new(0)));
        assert!(activation.is_faulted());

        activation.reset();
        assert_eq!(activation, Activation::Uninitialized);
    }
}
