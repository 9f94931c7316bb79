use std::fmt;
use std::rc::Rc;

use crate::event::Event;
use crate::object::{SimId, SimObject};
use crate::timeline::Timeline;
use crate::{BASELINE_WEIGHT, Timedelta, Weight};

/// The behavior of an action kind: when it is ready to be scheduled.
pub trait ActionBehavior: fmt::Debug {
    /// Name of this action kind. Also the default display name of its actions.
    fn kind(&self) -> &'static str;

    /// Whether `action` should be scheduled now.
    ///
    /// Evaluated once per loop iteration against the live timeline. Must not
    /// have side effects. The default only refuses actions flagged active.
    fn ready_to_start(&self, action: &Action, _timeline: &Timeline) -> bool {
        !action.is_active()
    }
}

/// Behavior with the default readiness rule and the plain `Action` kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAction;

impl ActionBehavior for BasicAction {
    fn kind(&self) -> &'static str {
        "Action"
    }
}

/// A unit of scheduling.
///
/// Scheduling an action enqueues a copy of each of its events at
/// `current_time + offset`. The event list is a template and is never
/// consumed.
#[derive(Debug, Clone)]
pub struct Action {
    object: SimObject,
    behavior: Rc<dyn ActionBehavior>,
    duration: Timedelta,
    events: Vec<(Timedelta, Event)>,
    weight: Weight,
    active: bool,
}

impl Action {
    /// Create an action named after its behavior's kind.
    pub fn new(behavior: impl ActionBehavior + 'static) -> Self {
        Self {
            object: SimObject::new(behavior.kind()),
            behavior: Rc::new(behavior),
            duration: 0,
            events: Vec::new(),
            weight: BASELINE_WEIGHT,
            active: false,
        }
    }

    /// Create an action with [`BasicAction`] behavior.
    pub fn basic() -> Self {
        Self::new(BasicAction)
    }

    /// Override the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.object.name = name.into();
        self
    }

    /// Set the execution-order weight.
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the nominal duration.
    pub fn with_duration(mut self, duration: Timedelta) -> Self {
        self.duration = duration;
        self
    }

    /// Append an event to the template, due `offset` after scheduling.
    pub fn with_event(mut self, offset: Timedelta, event: Event) -> Self {
        self.events.push((offset, event));
        self
    }

    /// Flag the action as already active, which the default readiness rule refuses.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Identity of this action.
    pub fn object(&self) -> &SimObject {
        &self.object
    }

    /// Unique identifier, shared with every copy.
    pub fn id(&self) -> SimId {
        self.object.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// Kind name of the behavior.
    pub fn kind(&self) -> &'static str {
        self.behavior.kind()
    }

    /// Execution-order weight.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Nominal duration. Informational; scheduling only uses event offsets.
    pub fn duration(&self) -> Timedelta {
        self.duration
    }

    /// The `(offset, event)` template.
    pub fn events(&self) -> &[(Timedelta, Event)] {
        &self.events
    }

    /// Whether the action is flagged active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ask the behavior whether this action should be scheduled now.
    pub fn ready_to_start(&self, timeline: &Timeline) -> bool {
        self.behavior.ready_to_start(self, timeline)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.object, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Once;

    impl ActionBehavior for Once {
        fn kind(&self) -> &'static str {
            "Once"
        }

        fn ready_to_start(&self, action: &Action, timeline: &Timeline) -> bool {
            !timeline.action_already_planned(action)
        }
    }

    fn noop() -> Event {
        Event::from_fn("noop", |s, _| Ok(s))
    }

    #[test]
    fn basic_action_defaults() {
        let a = Action::basic();
        assert_eq!(a.name(), "Action");
        assert_eq!(a.kind(), "Action");
        assert_eq!(a.weight(), BASELINE_WEIGHT);
        assert_eq!(a.duration(), 0);
        assert!(a.events().is_empty());
        assert!(!a.is_active());
    }

    #[test]
    fn builder_chain() {
        let a = Action::basic()
            .with_name("pour")
            .with_weight(100)
            .with_duration(5)
            .with_event(3, noop())
            .with_event(5, noop());
        assert_eq!(a.name(), "pour");
        assert_eq!(a.weight(), 100);
        assert_eq!(a.duration(), 5);
        let offsets: Vec<Timedelta> = a.events().iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![3, 5]);
    }

    #[test]
    fn copied_actions_are_equal() {
        let a = Action::basic();
        assert_eq!(a, a.clone());
        assert_ne!(a, Action::basic());
    }

    #[test]
    fn default_readiness_refuses_active_actions() {
        let timeline = Timeline::new();
        let mut a = Action::basic();
        assert!(a.ready_to_start(&timeline));
        a.set_active(true);
        assert!(!a.ready_to_start(&timeline));
    }

    #[test]
    fn custom_readiness_sees_the_timeline() {
        let mut timeline = Timeline::new();
        let a = Action::new(Once).with_event(3, noop());
        assert!(a.ready_to_start(&timeline));
        timeline.schedule_action(&a);
        assert!(!a.ready_to_start(&timeline));
    }
}
