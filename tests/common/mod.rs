//! Shared fixtures: a job machine whose states record their lifecycle.

#![allow(dead_code)]

use statecell::core::{Event, State};
use statecell::machine::Machine;
use statecell::{MachineBuilder, StateBuilder};
use std::sync::{Arc, Mutex};

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

/// Payload that records its own destruction.
#[derive(Debug)]
pub struct Probe {
    pub name: &'static str,
    log: Log,
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.log.lock().unwrap().push(format!("destroy:{}", self.name));
    }
}

#[derive(Debug)]
pub enum Job {
    Idle(Probe),
    Running(Probe),
    Stopped(Probe),
}

impl State for Job {
    fn name(&self) -> &str {
        match self {
            Self::Idle(_) => "Idle",
            Self::Running(_) => "Running",
            Self::Stopped(_) => "Stopped",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Signal {
    Start,
    Finish,
    Abort,
}

impl Event for Signal {
    type Kind = Signal;

    fn kind(&self) -> Signal {
        *self
    }
}

fn probed(name: &'static str, wrap: fn(Probe) -> Job, log: &Log) -> StateBuilder<Job, Signal> {
    let (construct, activate, deactivate) = (log.clone(), log.clone(), log.clone());
    StateBuilder::new(name)
        .init(move || {
            construct.lock().unwrap().push(format!("construct:{name}"));
            wrap(Probe {
                name,
                log: construct.clone(),
            })
        })
        .on_activate(move |_| activate.lock().unwrap().push(format!("activate:{name}")))
        .on_deactivate(move |_| {
            deactivate
                .lock()
                .unwrap()
                .push(format!("deactivate:{name}"))
        })
}

/// States {Idle, Running, Stopped}, table {(Idle,Start)->Running,
/// (Running,Finish)->Stopped}. `Abort` is never declared.
pub fn job_machine(log: &Log) -> Machine<Job, Signal> {
    MachineBuilder::new()
        .name("job")
        .state(probed("Idle", Job::Idle, log))
        .state(probed("Running", Job::Running, log))
        .state(probed("Stopped", Job::Stopped, log))
        .initial("Idle")
        .transition("Idle", Signal::Start, "Running")
        .transition("Running", Signal::Finish, "Stopped")
        .build()
        .unwrap()
}
