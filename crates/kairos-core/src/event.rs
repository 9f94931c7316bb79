use std::fmt;
use std::rc::Rc;

use rand::rngs::StdRng;

use crate::error::HookResult;
use crate::object::{SimId, SimObject};
use crate::state::State;
use crate::{BASELINE_WEIGHT, Time, Weight};

/// What a hook gets to see besides the state it transforms.
pub struct HookContext<'a> {
    /// The simulated time the event is executing at.
    pub time: Time,
    /// The run's seeded random number generator.
    pub rng: &'a mut StdRng,
}

impl fmt::Debug for HookContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookContext")
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

/// The behavior of an event kind: how it transforms a state.
///
/// Implementations should be a function of the incoming state and the
/// context. Errors abort the run.
pub trait EventHook: fmt::Debug {
    /// Name of this event kind. Also the default display name of its events.
    fn kind(&self) -> &'static str;

    /// Weight for events of this kind. `None` lets the scheduling action decide.
    fn weight(&self) -> Option<Weight> {
        None
    }

    /// Consume a state and produce the next one.
    fn apply(&self, state: State, ctx: &mut HookContext<'_>) -> HookResult<State>;
}

/// Hook built from a closure, see [`Event::from_fn`].
struct FnHook<F> {
    f: F,
}

impl<F> fmt::Debug for FnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHook")
    }
}

impl<F> EventHook for FnHook<F>
where
    F: Fn(State, &mut HookContext<'_>) -> HookResult<State>,
{
    fn kind(&self) -> &'static str {
        "Event"
    }

    fn apply(&self, state: State, ctx: &mut HookContext<'_>) -> HookResult<State> {
        (self.f)(state, ctx)
    }
}

/// A unit of state mutation.
///
/// The hook is shared between a template and its scheduled copies; the
/// `started` flag is not, so every scheduled copy reports its own execution.
#[derive(Debug, Clone)]
pub struct Event {
    object: SimObject,
    hook: Rc<dyn EventHook>,
    weight: Option<Weight>,
    origin: Option<&'static str>,
    started: bool,
}

impl Event {
    /// Create an event named after its hook's kind.
    pub fn new(hook: impl EventHook + 'static) -> Self {
        let weight = hook.weight();
        Self {
            object: SimObject::new(hook.kind()),
            hook: Rc::new(hook),
            weight,
            origin: None,
            started: false,
        }
    }

    /// Create an event from a closure.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(State, &mut HookContext<'_>) -> HookResult<State> + 'static,
    {
        Self::new(FnHook { f }).with_name(name)
    }

    /// Override the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.object.name = name.into();
        self
    }

    /// Set an explicit weight.
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Identity of this event.
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

    /// Kind name of the hook.
    pub fn kind(&self) -> &'static str {
        self.hook.kind()
    }

    /// Execution-order weight, falling back to the baseline.
    pub fn weight(&self) -> Weight {
        self.weight.unwrap_or(BASELINE_WEIGHT)
    }

    /// Kind of the action that scheduled this copy, if any.
    pub fn origin(&self) -> Option<&'static str> {
        self.origin
    }

    /// Whether this copy has been invoked.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Invoke the hook. Marks the event started before delegating.
    pub fn fire(&mut self, state: State, ctx: &mut HookContext<'_>) -> HookResult<State> {
        self.started = true;
        self.hook.apply(state, ctx)
    }

    /// Stamp a copy with the action that scheduled it. An event without an
    /// explicit weight takes the action's.
    pub(crate) fn scheduled_by(mut self, kind: &'static str, weight: Weight) -> Self {
        self.origin = Some(kind);
        self.weight = Some(self.weight.unwrap_or(weight));
        self
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.object, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[derive(Debug)]
    struct Increment;

    impl EventHook for Increment {
        fn kind(&self) -> &'static str {
            "Increment"
        }

        fn apply(&self, state: State, _ctx: &mut HookContext<'_>) -> HookResult<State> {
            let n = state.get_int("n").unwrap_or(0);
            Ok(state.with("n", n + 1))
        }
    }

    #[derive(Debug)]
    struct Urgent;

    impl EventHook for Urgent {
        fn kind(&self) -> &'static str {
            "Urgent"
        }

        fn weight(&self) -> Option<Weight> {
            Some(2)
        }

        fn apply(&self, state: State, _ctx: &mut HookContext<'_>) -> HookResult<State> {
            Ok(state)
        }
    }

    fn ctx(rng: &mut StdRng) -> HookContext<'_> {
        HookContext { time: 0, rng }
    }

    #[test]
    fn name_defaults_to_kind() {
        assert_eq!(Event::new(Increment).name(), "Increment");
    }

    #[test]
    fn explicit_name_overrides_kind() {
        let e = Event::new(Increment).with_name("tick");
        assert_eq!(e.name(), "tick");
        assert_eq!(e.kind(), "Increment");
    }

    #[test]
    fn copied_events_are_equal() {
        let e = Event::from_fn("test", |s, _| Ok(s));
        assert_eq!(e, e.clone());
        assert_ne!(e, Event::from_fn("test", |s, _| Ok(s)));
    }

    #[test]
    fn fire_marks_started_and_runs_hook() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = Event::new(Increment);
        assert!(!e.is_started());
        let state = e.fire(State::new(), &mut ctx(&mut rng)).unwrap();
        assert!(e.is_started());
        assert_eq!(state.get_int("n"), Some(1));
    }

    #[test]
    fn copies_do_not_share_started() {
        let mut rng = StdRng::seed_from_u64(1);
        let template = Event::new(Increment);
        let mut copy = template.clone();
        copy.fire(State::new(), &mut ctx(&mut rng)).unwrap();
        assert!(copy.is_started());
        assert!(!template.is_started());
    }

    #[test]
    fn failing_hook_still_marks_started() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = Event::from_fn("broken", |_, _| Err("leaky bucket".into()));
        let err = e.fire(State::new(), &mut ctx(&mut rng)).unwrap_err();
        assert_eq!(err.to_string(), "leaky bucket");
        assert!(e.is_started());
    }

    #[test]
    fn hook_sees_context_time() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = Event::from_fn("clock", |s, ctx| Ok(s.with("t", ctx.time as i64)));
        let mut ctx = HookContext {
            time: 7,
            rng: &mut rng,
        };
        let state = e.fire(State::new(), &mut ctx).unwrap();
        assert_eq!(state.get_int("t"), Some(7));
    }

    #[test]
    fn weight_resolution() {
        assert_eq!(Event::new(Increment).weight(), BASELINE_WEIGHT);
        assert_eq!(Event::new(Urgent).weight(), 2);
        assert_eq!(Event::new(Urgent).with_weight(9).weight(), 9);
    }

    #[test]
    fn scheduled_copy_inherits_action_weight_only_when_unset() {
        let plain = Event::new(Increment).scheduled_by("Drip", 100);
        assert_eq!(plain.weight(), 100);
        assert_eq!(plain.origin(), Some("Drip"));

        let urgent = Event::new(Urgent).scheduled_by("Drip", 100);
        assert_eq!(urgent.weight(), 2);
    }
}
