//! A bucket under a leaky tap. Every three ticks a random number of drops
//! falls in; once the bucket holds more than 100 drops it overflows on the
//! next tick and starts over empty.

use kairos_core::{
    Action, ActionBehavior, Event, EventHook, HookContext, HookResult, State, Timeline, Values,
    Weight,
};
use rand::Rng;

use super::Scenario;

/// Drops in the bucket above which it overflows.
const CAPACITY: i64 = 100;

pub fn scenario() -> Scenario {
    Scenario {
        name: "water-bucket",
        description: "Random drops fill a bucket that overflows past 100 drops",
        max_duration: 600,
        initial_values,
        catalog,
    }
}

fn initial_values() -> Values {
    State::new().with("drops", 0).with("overflows", 0).values
}

fn catalog() -> Vec<Action> {
    vec![
        Action::new(Tap).with_event(3, Event::new(WaterDrop)),
        Action::new(OverflowWatch).with_event(1, Event::new(Overflow)),
    ]
}

fn drops(state: &State) -> HookResult<i64> {
    state
        .get_int("drops")
        .ok_or_else(|| "water bucket state has no \"drops\" value".into())
}

/// Adds between 1 and 10 drops.
#[derive(Debug)]
struct WaterDrop;

impl EventHook for WaterDrop {
    fn kind(&self) -> &'static str {
        "WaterDrop"
    }

    fn apply(&self, state: State, ctx: &mut HookContext<'_>) -> HookResult<State> {
        let drops = drops(&state)?;
        Ok(state.with("drops", drops + ctx.rng.random_range(1..=10)))
    }
}

/// Empties the bucket and counts the overflow.
#[derive(Debug)]
struct Overflow;

impl EventHook for Overflow {
    fn kind(&self) -> &'static str {
        "Overflow"
    }

    // Runs before a drop landing on the same tick.
    fn weight(&self) -> Option<Weight> {
        Some(2)
    }

    fn apply(&self, state: State, _ctx: &mut HookContext<'_>) -> HookResult<State> {
        let overflows = state.get_int("overflows").unwrap_or(0);
        Ok(state.with("drops", 0).with("overflows", overflows + 1))
    }
}

/// Keeps exactly one drop pending at all times.
#[derive(Debug)]
struct Tap;

impl ActionBehavior for Tap {
    fn kind(&self) -> &'static str {
        "Tap"
    }

    fn ready_to_start(&self, action: &Action, timeline: &Timeline) -> bool {
        !timeline.action_already_planned(action)
    }
}

/// Books one overflow when the bucket is over capacity.
#[derive(Debug)]
struct OverflowWatch;

impl ActionBehavior for OverflowWatch {
    fn kind(&self) -> &'static str {
        "OverflowWatch"
    }

    fn ready_to_start(&self, action: &Action, timeline: &Timeline) -> bool {
        timeline.current_state().get_int("drops").unwrap_or(0) > CAPACITY
            && !timeline.action_already_planned(action)
    }
}
