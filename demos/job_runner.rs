//! Job Runner
//!
//! A batch job with nested states, a fallible initializer and a snapshot
//! that survives a restart.
//!
//! Key concepts:
//! - Nested states (Queued and Running inside Active)
//! - A parent transition (Cancel) shared by every child
//! - Construction failure faulting the machine until teardown
//! - JSON snapshot and restore into a fresh machine
//!
//! Run with: RUST_LOG=statecell=debug cargo run --example job_runner

use statecell::builder::{MachineBuilder, StateBuilder};
use statecell::core::Event;
use statecell::{state_enum, ConstructError, Machine, Snapshot};

state_enum! {
    enum Job {
        Active,
        Queued,
        Running(u32),
        Cancelled,
        Done(u32),
    }
    final: [Cancelled, Done]
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CommandKind {
    Start,
    Finish,
    Cancel,
}

#[derive(Debug)]
enum Command {
    Start { workers: u32 },
    Finish { processed: u32 },
    Cancel,
}

impl Event for Command {
    type Kind = CommandKind;

    fn kind(&self) -> CommandKind {
        match self {
            Self::Start { .. } => CommandKind::Start,
            Self::Finish { .. } => CommandKind::Finish,
            Self::Cancel => CommandKind::Cancel,
        }
    }
}

fn job_machine() -> Machine<Job, Command> {
    MachineBuilder::new()
        .name("batch")
        .state(StateBuilder::new("Active").init(|| Job::Active))
        .state(StateBuilder::new("Queued").init(|| Job::Queued).within("Active"))
        .state(
            StateBuilder::new("Running")
                .try_init_with_event(|cmd: &Command| match cmd {
                    Command::Start { workers: 0 } => {
                        Err(ConstructError::new("a job needs at least one worker"))
                    }
                    Command::Start { workers } => Ok(Job::Running(*workers)),
                    other => Err(ConstructError::new(format!("cannot start on {other:?}"))),
                })
                .within("Active"),
        )
        .state(StateBuilder::new("Cancelled").init(|| Job::Cancelled))
        .state(
            StateBuilder::new("Done").init_with_event(|cmd: &Command| match cmd {
                Command::Finish { processed } => Job::Done(*processed),
                _ => Job::Done(0),
            }),
        )
        .initial("Queued")
        .transition("Queued", CommandKind::Start, "Running")
        .transition("Running", CommandKind::Finish, "Done")
        .transition("Active", CommandKind::Cancel, "Cancelled")
        .history_limit(16)
        .build()
        .unwrap()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Job Runner ===\n");

    println!("1. Starting with no workers faults the machine");
    let mut job = job_machine();
    job.initialize().unwrap();
    match job.react(&Command::Start { workers: 0 }) {
        Ok(reaction) => println!("   unexpected: {reaction:?}"),
        Err(e) => println!("   error: {e}"),
    }
    println!("   status: {:?}", job.status());
    if let Err(e) = job.react(&Command::Cancel) {
        println!("   cancel rejected: {e}");
    }
    job.teardown();
    println!("   after teardown: {:?}\n", job.status());

    println!("2. Running, then snapshotting");
    job.initialize().unwrap();
    job.react(&Command::Start { workers: 4 }).unwrap();
    println!("   live state: {:?}", job.state());
    let json = match job.snapshot().map(|s| s.to_json()) {
        Some(Ok(json)) => json,
        Some(Err(e)) => {
            println!("   snapshot failed: {e}");
            return;
        }
        None => return,
    };
    println!("   snapshot: {json}\n");

    println!("3. Restoring into a fresh machine and cancelling");
    let mut restored = job_machine();
    let snapshot: Snapshot<Job> = Snapshot::from_json(&json).unwrap();
    restored.restore(snapshot).unwrap();
    println!("   restored state: {:?}", restored.state());

    // Running has no Cancel entry of its own; Active's applies.
    restored.react(&Command::Cancel).unwrap();
    println!("   after cancel: {:?}", restored.state());
    println!("   final: {}", restored.is_final());

    let path: Vec<_> = restored
        .history()
        .get_path()
        .into_iter()
        .filter_map(|tag| restored.catalog().name_of(tag))
        .collect();
    println!("   path: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
}
