//! Core contracts shared by every other module.
//!
//! - State values via the `State` trait, identified by `StateTag`
//! - Events via the `Event` trait, classified by their kind
//! - Guard predicates narrowing transition entries
//! - Bounded transition history

mod event;
mod guard;
mod history;
mod state;

pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use state::{State, StateTag};
