//! Traffic Light State Machine
//!
//! A cyclic machine whose states carry data and whose timer events are
//! narrowed by a guard.
//!
//! Key concepts:
//! - Cyclic transitions (Red -> Green -> Yellow -> Red)
//! - Event-aware initializers building state payloads
//! - Guarded transitions ignoring early timer ticks
//! - Activate/deactivate hooks
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use statecell::builder::{MachineBuilder, StateBuilder};
use statecell::core::Event;
use statecell::{state_enum, Guard, Reaction};

state_enum! {
    enum Light {
        Red(u32),
        Green(u32),
        Yellow(u32),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum TimerKind {
    Elapsed,
}

/// Seconds since the light last changed.
#[derive(Debug)]
struct Elapsed(u32);

impl Event for Elapsed {
    type Kind = TimerKind;

    fn kind(&self) -> TimerKind {
        TimerKind::Elapsed
    }
}

fn after(min: u32) -> Guard<Elapsed> {
    Guard::new(move |e: &Elapsed| e.0 >= min)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let mut light = MachineBuilder::new()
        .name("crossing")
        .state(
            StateBuilder::new("Red")
                .init(|| Light::Red(0))
                .init_with_event(|e: &Elapsed| Light::Red(e.0))
                .on_activate(|_| println!("  [hook] stop"))
                .on_deactivate(|_| println!("  [hook] leaving red")),
        )
        .state(
            StateBuilder::new("Green")
                .init_with_event(|e: &Elapsed| Light::Green(e.0))
                .on_activate(|_| println!("  [hook] go")),
        )
        .state(
            StateBuilder::new("Yellow")
                .init_with_event(|e: &Elapsed| Light::Yellow(e.0))
                .on_activate(|_| println!("  [hook] caution")),
        )
        .initial("Red")
        .transition_when("Red", TimerKind::Elapsed, "Green", after(30))
        .transition_when("Green", TimerKind::Elapsed, "Yellow", after(25))
        .transition_when("Yellow", TimerKind::Elapsed, "Red", after(5))
        .build()
        .unwrap();

    light.initialize().unwrap();
    println!("Initial state: {:?}\n", light.state());

    for seconds in [10, 30, 25, 2, 5, 30] {
        match light.react(&Elapsed(seconds)).unwrap() {
            Reaction::Transitioned { .. } => {
                println!("{seconds:>3}s -> {:?}", light.state());
            }
            Reaction::Ignored => {
                println!("{seconds:>3}s -> still {}", light.current_name().unwrap_or("?"));
            }
        }
    }

    println!("\nPath taken:");
    for record in light.history().transitions() {
        let name = |tag| light.catalog().name_of(tag).unwrap_or("?");
        println!("  {} -> {}", name(record.from), name(record.to));
    }

    light.teardown();
    println!("\n=== Example Complete ===");
}
