//! Statecell: a hierarchical finite state machine engine
//!
//! A machine is declared once: a catalog of states, each built by its own
//! initializer, and a table of permitted (state, event kind) transitions.
//! At runtime exactly one state value is live, held in a single slot. Each
//! event either replaces it (deactivate, destroy, construct, activate) or is
//! ignored.
//!
//! # Core Concepts
//!
//! - **State**: the caller's sum type, one variant per declared state
//! - **Catalog**: ordered registry of states, tagged in declaration order
//! - **Transition Table**: (state, event kind) to target, fixed at build time
//! - **Machine**: the storage slot, activation tracker and event dispatch
//! - **Snapshot**: a serde copy of the live state for external persistence
//!
//! # Example
//!
//! ```rust
//! use statecell::builder::{MachineBuilder, StateBuilder};
//! use statecell::core::Event;
//! use statecell::state_enum;
//!
//! state_enum! {
//!     enum Job {
//!         Idle,
//!         Running,
//!         Stopped,
//!     }
//!     final: [Stopped]
//! }
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Signal {
//!     Start,
//!     Finish,
//! }
//!
//! impl Event for Signal {
//!     type Kind = Signal;
//!     fn kind(&self) -> Signal {
//!         *self
//!     }
//! }
//!
//! let mut job = MachineBuilder::new()
//!     .state(StateBuilder::new("Idle").init(|| Job::Idle))
//!     .state(StateBuilder::new("Running").init(|| Job::Running))
//!     .state(StateBuilder::new("Stopped").init(|| Job::Stopped))
//!     .initial("Idle")
//!     .transition("Idle", Signal::Start, "Running")
//!     .transition("Running", Signal::Finish, "Stopped")
//!     .build()
//!     .unwrap();
//!
//! job.initialize().unwrap();
//! job.react(&Signal::Start).unwrap();
//! job.react(&Signal::Finish).unwrap();
//! assert_eq!(job.current_name(), Some("Stopped"));
//!
//! // No entry for (Stopped, Start): ignored.
//! job.react(&Signal::Start).unwrap();
//! assert!(job.is_final());
//!
//! job.teardown();
//! assert_eq!(job.current(), None);
//! ```

pub mod builder;
pub mod catalog;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod table;

// Re-export commonly used types
pub use builder::{BuildError, ConfigError, MachineBuilder, StateBuilder};
pub use catalog::{ConstructError, StateCatalog};
pub use checkpoint::{CheckpointError, Snapshot};
pub use crate::core::{Event, Guard, State, StateHistory, StateTag};
pub use machine::{Activation, Machine, MachineError, Reaction};
pub use table::TransitionTable;
