//! The running machine.
//!
//! - `StorageCell`: the single slot holding the live state value
//! - `Activation`: which tag, if any, is live
//! - `Machine`: dispatches events through the transition table
//!
//! Every operation is synchronous and takes `&self` or `&mut self`; sharing
//! one machine between threads needs an external lock.

mod activation;
mod cell;
mod error;
mod reactor;

pub use activation::Activation;
pub use cell::StorageCell;
pub use error::MachineError;
pub use reactor::{Machine, Reaction};
