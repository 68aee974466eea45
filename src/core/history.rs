//! State transition history tracking.
//!
//! The machine appends one [`TransitionRecord`] per completed transition.
//! Ignored events and faulted transitions are not recorded.

use super::state::StateTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: StateTag,
    /// The state being transitioned to
    pub to: StateTag,
    /// Debug rendering of the event kind that caused the transition
    pub event: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions, optionally bounded.
///
/// When a limit is set the oldest records are discarded first. A limit of
/// zero disables recording.
///
/// # Example
///
/// ```rust
/// use statecell::core::StateHistory;
///
/// let history = StateHistory::with_limit(Some(8));
/// assert!(history.transitions().len() == 0);
/// assert_eq!(history.limit(), Some(8));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<TransitionRecord>,
    limit: Option<usize>,
}

impl StateHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history retaining at most `limit` records.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
        }
    }

    /// Maximum number of retained records, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a record, evicting the oldest when over the limit.
    pub fn record(&mut self, transition: TransitionRecord) {
        if self.limit == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the oldest retained record followed by the
    /// target of every record, in order.
    pub fn get_path(&self) -> Vec<StateTag> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Calculate total duration from first to last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate retained records, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
