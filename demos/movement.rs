//! Movement State Hierarchy
//!
//! This example demonstrates nested states sharing a parent.
//!
//! Key concepts:
//! - Idle/Walk/Run nested under a common Movement state
//! - Event-driven transitions between siblings
//! - A guarded transition out of the Movement group
//! - Shared ancestors are not exited when moving between siblings
//!
//! Run with: RUST_LOG=hfsm=debug cargo run --example movement

use hfsm::state_ids;
use hfsm::{BuildError, HfsmBuilder, StateBuilder, TransitionBuilder};
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

state_ids! {
    enum Locomotion {
        Root,
        Movement,
        Idle,
        Walk,
        Run,
        Exhausted,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Input {
    StartWalking,
    StartRunning,
    Stop,
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Movement State Hierarchy ===\n");

    let stamina = Rc::new(Cell::new(3));
    let drain = Rc::clone(&stamina);
    let check = Rc::clone(&stamina);
    let rest = Rc::clone(&stamina);

    let mut builder = HfsmBuilder::new();
    builder
        .state(Locomotion::Root)?
        .add_state(
            StateBuilder::new(Locomotion::Movement)
                .parent(Locomotion::Root)
                .on_enter(|| println!("  [Movement] enter"))
                .on_exit(|| println!("  [Movement] exit")),
        )?
        .add_state(
            StateBuilder::new(Locomotion::Idle)
                .parent(Locomotion::Movement)
                .on_enter(|| println!("  [Idle] enter"))
                .on_exit(|| println!("  [Idle] exit")),
        )?
        .add_state(
            StateBuilder::new(Locomotion::Walk)
                .parent(Locomotion::Movement)
                .on_enter(|| println!("  [Walk] enter"))
                .on_exit(|| println!("  [Walk] exit")),
        )?
        .add_state(
            StateBuilder::new(Locomotion::Run)
                .parent(Locomotion::Movement)
                .on_enter(|| println!("  [Run] enter"))
                .on_update(move || drain.set(drain.get() - 1))
                .on_exit(|| println!("  [Run] exit")),
        )?
        .add_state(
            StateBuilder::new(Locomotion::Exhausted)
                .parent(Locomotion::Root)
                .on_enter(move || {
                    println!("  [Exhausted] enter");
                    rest.set(3);
                }),
        )?
        .transition_on(Locomotion::Idle, Locomotion::Walk, Input::StartWalking)
        .transition_on(Locomotion::Walk, Locomotion::Run, Input::StartRunning)
        .transition_on(Locomotion::Run, Locomotion::Idle, Input::Stop)
        .add_transition(
            TransitionBuilder::new(Locomotion::Movement, Locomotion::Exhausted)
                .when(move || check.get() <= 0),
        )
        .transition(Locomotion::Exhausted, Locomotion::Movement);

    let mut machine = builder.build()?;

    println!("start");
    machine.start();
    println!("  path: {}\n", machine.dotted_path());

    let script = [
        Some(Input::StartWalking),
        Some(Input::StartRunning),
        None,
        None,
        None,
        None,
        None,
    ];
    for event in script {
        if let Some(event) = event {
            println!("send {event:?}");
            machine.send_event(event);
        } else {
            println!("tick (stamina {})", stamina.get());
        }
        let outcome = machine.update();
        println!("  {outcome:?}");
        println!("  path: {}\n", machine.dotted_path());
    }

    println!("stop");
    machine.stop();

    println!("\nLeaf history:");
    for change in machine.history().changes() {
        println!(
            "  tick {:>2}: {:?} -> {:?} ({})",
            change.tick, change.from, change.to, change.trigger
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
