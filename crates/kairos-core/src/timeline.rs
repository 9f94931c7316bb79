use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use crate::Time;
use crate::action::Action;
use crate::error::{CoreError, CoreResult};
use crate::event::Event;
use crate::object::SimObject;
use crate::state::{State, Values};
use crate::timeslot::Timeslot;

/// Tracks states, actions, and events over simulated time.
///
/// The state map always holds the initial snapshot at time 0. The current
/// time is the latest time with a snapshot. Scheduled items are stored as
/// copies so one action template can be scheduled any number of times.
#[derive(Debug, Clone)]
pub struct Timeline {
    states: BTreeMap<Time, State>,
    events: BTreeMap<Time, Timeslot<Event>>,
    actions: BTreeMap<Time, Timeslot<Action>>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create a timeline with an empty initial state.
    pub fn new() -> Self {
        Self::with_initial_values(Values::new())
    }

    /// Create a timeline whose time-0 state holds `values`.
    pub fn with_initial_values(values: Values) -> Self {
        let mut states = BTreeMap::new();
        states.insert(0, State::from_values(values));
        Self {
            states,
            events: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }

    /// The latest time with a recorded state.
    pub fn current_time(&self) -> Time {
        self.states.keys().next_back().copied().unwrap_or(0)
    }

    /// The state at [`Timeline::current_time`].
    pub fn current_state(&self) -> &State {
        &self.states[&self.current_time()]
    }

    /// All recorded states by time.
    pub fn states(&self) -> &BTreeMap<Time, State> {
        &self.states
    }

    /// All scheduled events by time, past and future.
    pub fn events(&self) -> &BTreeMap<Time, Timeslot<Event>> {
        &self.events
    }

    /// All scheduled actions by the time they were scheduled at.
    pub fn actions(&self) -> &BTreeMap<Time, Timeslot<Action>> {
        &self.actions
    }

    /// Schedule a copy of `action` at the current time along with a copy of
    /// each of its events at `current_time + offset`.
    ///
    /// Every call adds another instance. Actions that must not be booked twice
    /// guard against it in their readiness rule.
    pub fn schedule_action(&mut self, action: &Action) {
        let now = self.current_time();
        self.actions
            .entry(now)
            .or_default()
            .add(action.clone(), action.weight());
        for (offset, event) in action.events() {
            let copy = event.clone().scheduled_by(action.kind(), action.weight());
            self.schedule_event(copy, Some(now.saturating_add(*offset)));
        }
    }

    /// Schedule `event` at `time`, or at the current time if `None`.
    pub fn schedule_event(&mut self, event: Event, time: Option<Time>) {
        let time = time.unwrap_or_else(|| self.current_time());
        let weight = event.weight();
        self.events.entry(time).or_default().add(event, weight);
    }

    /// Record `state` as the snapshot at `time`, replacing any existing one.
    pub fn set_state(&mut self, state: State, time: Time) {
        self.states.insert(time, state);
    }

    /// Events scheduled strictly after the current time, in execution order.
    pub fn events_to_come(&self) -> Vec<&Event> {
        self.upcoming().collect()
    }

    /// The first non-empty timeslot strictly after the current time.
    pub fn first_upcoming_event(&self) -> Option<(Time, &Timeslot<Event>)> {
        self.first_upcoming_event_after(self.current_time())
    }

    /// The first non-empty timeslot strictly after `time`.
    ///
    /// Purely time-based: a slot whose events already ran is still returned.
    pub fn first_upcoming_event_after(&self, time: Time) -> Option<(Time, &Timeslot<Event>)> {
        self.events
            .range((Excluded(time), Unbounded))
            .find(|(_, slot)| !slot.is_empty())
            .map(|(t, slot)| (*t, slot))
    }

    /// Mutable access to the events scheduled at `time`.
    pub fn event_slot_mut(&mut self, time: Time) -> CoreResult<&mut Timeslot<Event>> {
        self.events.get_mut(&time).ok_or(CoreError::NoEventsAt(time))
    }

    /// The latest scheduled event matching `predicate`, past or future.
    ///
    /// Among matches at the same time, the one executing last wins.
    pub fn last_event_occurrence<P>(&self, mut predicate: P) -> Option<(Time, &Event)>
    where
        P: FnMut(&Event) -> bool,
    {
        self.events.iter().rev().find_map(|(t, slot)| {
            slot.iter()
                .filter(|event| predicate(event))
                .last()
                .map(|event| (*t, event))
        })
    }

    /// The latest scheduled event of the given hook kind.
    pub fn last_event_occurrence_of_kind(&self, kind: &str) -> Option<(Time, &Event)> {
        self.last_event_occurrence(|event| event.kind() == kind)
    }

    /// Every item completed so far, in execution order, with the time of the
    /// snapshot that recorded it.
    pub fn completed_events(&self) -> impl Iterator<Item = (Time, &SimObject)> {
        self.states
            .iter()
            .flat_map(|(t, state)| state.completed_events().iter().map(move |item| (*t, item)))
    }

    /// Whether an event scheduled by an action of the same kind is still to come.
    pub fn action_already_planned(&self, action: &Action) -> bool {
        let kind = action.kind();
        self.upcoming().any(|event| event.origin() == Some(kind))
    }

    fn upcoming(&self) -> impl Iterator<Item = &Event> {
        self.events
            .range((Excluded(self.current_time()), Unbounded))
            .flat_map(|(_, slot)| slot.iter())
    }
}
