//! The machine: activation tracking plus event dispatch.

use crate::catalog::{StateCatalog, StateDescriptor};
use crate::core::{Event, State, StateHistory, StateTag, TransitionRecord};
use crate::machine::activation::Activation;
use crate::machine::cell::StorageCell;
use crate::machine::error::MachineError;
use crate::table::TransitionTable;
use chrono::Utc;
use tracing::{debug, trace, warn};

/// Outcome of a successful [`Machine::react`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// The live state was replaced.
    Transitioned { from: StateTag, to: StateTag },

    /// No transition matched; nothing changed and no hooks ran.
    Ignored,
}

impl Reaction {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// A state machine holding at most one live state value.
///
/// Built with [`MachineBuilder`](crate::builder::MachineBuilder). Starts
/// uninitialized; call [`initialize`](Self::initialize) to enter the initial
/// state.
pub struct Machine<S: State, E: Event> {
    pub(crate) name: String,
    pub(crate) catalog: StateCatalog<S, E>,
    pub(crate) table: TransitionTable<E>,
    pub(crate) initial: StateTag,
    pub(crate) cell: StorageCell<S>,
    pub(crate) activation: Activation,
    pub(crate) history: StateHistory,
}

impl<S: State, E: Event> Machine<S, E> {
    pub(crate) fn new(
        name: String,
        catalog: StateCatalog<S, E>,
        table: TransitionTable<E>,
        initial: StateTag,
        history: StateHistory,
    ) -> Self {
        Self {
            name,
            catalog,
            table,
            initial,
            cell: StorageCell::new(),
            activation: Activation::Uninitialized,
            history,
        }
    }

    /// Label used in log output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enter the initial state.
    ///
    /// Runs the initial state's default initializer and then its activate
    /// hook. If either fails the machine stays uninitialized.
    pub fn initialize(&mut self) -> Result<StateTag, MachineError> {
        self.ensure_uninitialized()?;

        let tag = self.initial;
        if let Err(err) = self.enter(tag, None) {
            warn!(
                machine = %self.name,
                state = self.descriptor(tag).name(),
                error = %err,
                "initial state failed to enter"
            );
            return Err(err);
        }
        self.activation.activate(tag);

        debug!(machine = %self.name, state = self.descriptor(tag).name(), "initialized");
        Ok(tag)
    }

    /// Dispatch one event.
    ///
    /// The active state's entry for the event kind is tried first, then the
    /// entries of its enclosing states, innermost first. The first entry that
    /// exists and admits the event wins. When none does, the event is ignored.
    ///
    /// A winning transition runs, in order: the source's deactivate hook,
    /// destruction of the source value, construction of the target value,
    /// the target's activate hook. If construction fails, or a hook replaces
    /// the value with another state's, the machine is left faulted with an
    /// empty cell until [`teardown`](Self::teardown).
    pub fn react(&mut self, event: &E) -> Result<Reaction, MachineError> {
        let source = self.active_tag()?;

        let kind = event.kind();
        if !self.table.classifies(&kind) {
            return Err(MachineError::UnknownEvent {
                kind: format!("{kind:?}"),
            });
        }

        let Some(target) = self.resolve(source, event) else {
            trace!(machine = %self.name, state = self.descriptor(source).name(), event = ?kind, "event ignored");
            return Ok(Reaction::Ignored);
        };

        let exited = self.exit(source);
        self.activation.fault(source, target);

        if let Err(err) = exited.and_then(|()| self.enter(target, Some(event))) {
            warn!(
                machine = %self.name,
                from = self.descriptor(source).name(),
                to = self.descriptor(target).name(),
                error = %err,
                "transition faulted"
            );
            return Err(err);
        }
        self.activation.activate(target);

        self.history.record(TransitionRecord {
            from: source,
            to: target,
            event: format!("{kind:?}"),
            timestamp: Utc::now(),
        });
        debug!(
            machine = %self.name,
            from = self.descriptor(source).name(),
            to = self.descriptor(target).name(),
            event = ?kind,
            "transitioned"
        );
        Ok(Reaction::Transitioned {
            from: source,
            to: target,
        })
    }

    /// Leave the live state and return to uninitialized.
    ///
    /// Runs the deactivate hook and drops the value. Clears a fault. Calling
    /// it on an uninitialized machine does nothing.
    pub fn teardown(&mut self) {
        match self.activation {
            Activation::Uninitialized => {}
            Activation::Active(tag) => {
                if let Err(err) = self.exit(tag) {
                    warn!(machine = %self.name, error = %err, "deactivate hook replaced the state");
                }
                self.activation.reset();
                debug!(machine = %self.name, state = self.descriptor(tag).name(), "torn down");
            }
            Activation::Faulted { .. } => {
                self.cell.destroy();
                self.activation.reset();
                debug!(machine = %self.name, "fault cleared");
            }
        }
    }

    /// Tag of the live state (pure).
    pub fn current(&self) -> Option<StateTag> {
        self.activation.current()
    }

    /// Name of the live state (pure).
    pub fn current_name(&self) -> Option<&str> {
        self.current().map(|tag| self.descriptor(tag).name())
    }

    /// Borrow the live state value.
    pub fn state(&self) -> Option<&S> {
        self.current().and(self.cell.get())
    }

    /// Edit the live state value in place and return what `f` returns.
    ///
    /// `f` may change the value's fields but not which state it is. A value
    /// replaced by another state's variant is dropped, and the machine is
    /// left faulted until [`teardown`](Self::teardown).
    pub fn update<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> Result<R, MachineError> {
        let tag = self.active_tag()?;
        let value = self.cell.get_mut().ok_or(MachineError::NotInitialized)?;
        let output = f(value);

        if let Err(err) = self.cell.verify(self.catalog.get(tag)) {
            self.activation.fault(tag, tag);
            warn!(machine = %self.name, error = %err, "update replaced the state");
            return Err(err);
        }
        Ok(output)
    }

    /// Activation status, including faults (pure).
    pub fn status(&self) -> Activation {
        self.activation
    }

    pub fn is_initialized(&self) -> bool {
        self.current().is_some()
    }

    pub fn is_faulted(&self) -> bool {
        self.activation.is_faulted()
    }

    /// Whether the live state is final.
    pub fn is_final(&self) -> bool {
        self.state().is_some_and(|s| s.is_final())
    }

    /// Whether `tag` is the live state or encloses it.
    pub fn is_in(&self, tag: StateTag) -> bool {
        self.current()
            .is_some_and(|live| self.catalog.is_within(live, tag))
    }

    pub fn initial(&self) -> StateTag {
        self.initial
    }

    pub fn catalog(&self) -> &StateCatalog<S, E> {
        &self.catalog
    }

    pub fn table(&self) -> &TransitionTable<E> {
        &self.table
    }

    /// Completed transitions (pure).
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Find the target for `event`, walking outward from `source`.
    fn resolve(&self, source: StateTag, event: &E) -> Option<StateTag> {
        let kind = event.kind();
        self.catalog
            .ancestry(source)
            .filter_map(|level| self.table.entry(level, kind))
            .find(|entry| entry.admits(event))
            .map(|entry| entry.target)
    }

    /// Construct `tag` in the empty cell and run its activate hook.
    fn enter(&mut self, tag: StateTag, event: Option<&E>) -> Result<(), MachineError> {
        let descriptor = self.catalog.get(tag);
        if let Err(source) = self.cell.construct(descriptor, event) {
            return Err(MachineError::ConstructionFailed {
                state: descriptor.name().to_string(),
                source,
            });
        }
        self.cell.activate(descriptor)
    }

    /// Deactivate and destroy `tag`, if it is the live state.
    fn exit(&mut self, tag: StateTag) -> Result<(), MachineError> {
        if !self.activation.is_active(tag) {
            return Ok(());
        }
        self.cell.retire(self.catalog.get(tag))
    }

    fn active_tag(&self) -> Result<StateTag, MachineError> {
        match self.activation {
            Activation::Active(tag) => Ok(tag),
            Activation::Uninitialized => Err(MachineError::NotInitialized),
            Activation::Faulted { from, to } => Err(self.faulted_error(from, to)),
        }
    }

    pub(crate) fn ensure_uninitialized(&self) -> Result<(), MachineError> {
        match self.activation {
            Activation::Uninitialized => Ok(()),
            Activation::Active(tag) => Err(MachineError::AlreadyInitialized {
                state: self.descriptor(tag).name().to_string(),
            }),
            Activation::Faulted { from, to } => Err(self.faulted_error(from, to)),
        }
    }

    fn faulted_error(&self, from: StateTag, to: StateTag) -> MachineError {
        MachineError::Faulted {
            from: self.descriptor(from).name().to_string(),
            to: self.descriptor(to).name().to_string(),
        }
    }

    pub(crate) fn descriptor(&self, tag: StateTag) -> &StateDescriptor<S, E> {
        self.catalog.get(tag)
    }
}
