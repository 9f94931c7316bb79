//! One counter, one tap: `n` goes up by one every three ticks.

use kairos_core::{Action, ActionBehavior, Event, Timeline, Values};

use super::Scenario;

pub fn scenario() -> Scenario {
    Scenario {
        name: "drip",
        description: "A counter incremented every 3 ticks, one pending drip at a time",
        max_duration: 8,
        initial_values: Values::new,
        catalog,
    }
}

fn catalog() -> Vec<Action> {
    let increment = Event::from_fn("Increment", |state, _| {
        let n = state.get_int("n").unwrap_or(0);
        Ok(state.with("n", n + 1))
    });
    vec![Action::new(Drip).with_event(3, increment)]
}

#[derive(Debug)]
struct Drip;

impl ActionBehavior for Drip {
    fn kind(&self) -> &'static str {
        "Drip"
    }

    fn ready_to_start(&self, action: &Action, timeline: &Timeline) -> bool {
        !timeline.action_already_planned(action)
    }
}
