//! Two plain actions booking one event each at the same offset. The heavier
//! action's event always runs first, whatever the catalog order.

use kairos_core::{Action, Event, Value, Values, Weight};

use super::Scenario;

pub fn scenario() -> Scenario {
    Scenario {
        name: "weighted",
        description: "Two actions of weight 0 and 100 racing for the same ticks",
        max_duration: 8,
        initial_values: Values::new,
        catalog,
    }
}

fn catalog() -> Vec<Action> {
    vec![labelled("low", 0), labelled("high", 100)]
}

/// A plain action whose event appends `label` to the `order` list.
fn labelled(label: &'static str, weight: Weight) -> Action {
    let event = Event::from_fn(format!("{label} event"), move |state, _| {
        let mut order = match state.get("order") {
            Some(Value::List(items)) => items.clone(),
            _ => Vec::new(),
        };
        order.push(Value::from(label));
        Ok(state.with("order", Value::List(order)))
    });
    Action::basic()
        .with_name(format!("{label} weight action"))
        .with_weight(weight)
        .with_event(3, event)
}

#[cfg(test)]
mod tests {
    use kairos_engine::{DiscreteSimulation, SimConfig};

    use super::*;

    #[test]
    fn high_weight_event_runs_first_every_time() {
        let s = scenario();
        let config = SimConfig::default().with_max_duration(s.max_duration);
        let mut sim = DiscreteSimulation::new(config, (s.catalog)(), (s.initial_values)());
        let outcome = sim.run().unwrap();

        let expected: Vec<Value> = ["high", "low", "high", "low"]
            .into_iter()
            .map(Value::from)
            .collect();
        assert_eq!(outcome.state.get("order"), Some(&Value::List(expected)));

        for slot in sim.timeline().events().values() {
            let names: Vec<&str> = slot.iter().map(Event::name).collect();
            assert_eq!(names, vec!["high event", "low event"]);
        }
    }
}
