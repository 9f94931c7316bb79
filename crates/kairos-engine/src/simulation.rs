use std::fmt;

use kairos_core::{Action, Event, HookContext, State, Time, Timeline, Values};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticsSink};
use crate::error::{SimError, SimResult};

/// Why a run stopped. Both are normal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No events remain after the current time.
    Drained,
    /// The next events lie beyond the maximum duration.
    MaxDurationReached,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drained => write!(f, "drained"),
            Self::MaxDurationReached => write!(f, "max_duration_reached"),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    /// Why the run stopped.
    pub reason: Termination,
    /// Simulated time of the last committed state.
    pub final_time: Time,
    /// Number of event hooks executed during this run.
    pub executed_events: usize,
    /// The last committed state.
    pub state: State,
}

/// The discrete-event run loop.
///
/// Owns the timeline, the catalog of available actions, the seeded RNG that
/// hooks draw from, and the diagnostics sink. Each iteration schedules every
/// ready action, then executes the next due timeslot.
pub struct DiscreteSimulation<S = DiagnosticLog> {
    config: SimConfig,
    catalog: Vec<Action>,
    timeline: Timeline,
    rng: StdRng,
    sink: S,
}

impl<S> fmt::Debug for DiscreteSimulation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscreteSimulation")
            .field("time", &self.timeline.current_time())
            .field("max_duration", &self.config.max_duration)
            .field("actions", &self.catalog.len())
            .field("scheduled_times", &self.timeline.events().len())
            .finish()
    }
}

impl DiscreteSimulation<DiagnosticLog> {
    /// Create a simulation that records diagnostics in an in-memory log.
    pub fn new(config: SimConfig, catalog: Vec<Action>, initial_values: Values) -> Self {
        let sink = DiagnosticLog::new(config.max_diagnostics);
        Self::with_sink(config, catalog, initial_values, sink)
    }
}

impl<S: DiagnosticsSink> DiscreteSimulation<S> {
    /// Create a simulation reporting to the given sink.
    pub fn with_sink(
        config: SimConfig,
        catalog: Vec<Action>,
        initial_values: Values,
        sink: S,
    ) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            catalog,
            timeline: Timeline::with_initial_values(initial_values),
            rng,
            sink,
        }
    }

    /// Discard the timeline and start over from `initial_values` at time 0.
    ///
    /// The catalog is kept. The RNG is reseeded so a reset run repeats the
    /// same draws.
    pub fn reset(&mut self, initial_values: Values) {
        self.timeline = Timeline::with_initial_values(initial_values);
        self.rng = StdRng::seed_from_u64(self.config.seed);
    }

    /// Register an action. Readiness is checked in registration order.
    pub fn add_action(&mut self, action: Action) {
        self.catalog.push(action);
    }

    /// Replace the whole catalog.
    pub fn set_catalog(&mut self, catalog: Vec<Action>) {
        self.catalog = catalog;
    }

    /// Run until the schedule drains or the next events exceed the maximum duration.
    ///
    /// A failing hook aborts the run. The timeline then holds every timeslot
    /// committed before the failure and nothing from the failing one.
    pub fn run(&mut self) -> SimResult<RunOutcome> {
        let max_duration = self.config.max_duration;
        self.sink.record(Diagnostic::new(
            self.timeline.current_time(),
            DiagnosticKind::RunStarted { max_duration },
            format!("starting simulation with max duration {max_duration}"),
        ));

        let mut executed_events = 0;
        let reason = loop {
            self.schedule_ready_actions();

            let Some((time, _)) = self.timeline.first_upcoming_event() else {
                break Termination::Drained;
            };
            if time > max_duration {
                break Termination::MaxDurationReached;
            }
            executed_events += self.execute_timeslot(time)?;
        };

        let final_time = self.timeline.current_time();
        let description = match reason {
            Termination::Drained => format!("no events left, stopping at time {final_time}"),
            Termination::MaxDurationReached => {
                format!("next events start after {max_duration}, stopping at time {final_time}")
            }
        };
        self.sink.record(Diagnostic::new(
            final_time,
            DiagnosticKind::Finished { reason },
            description,
        ));

        Ok(RunOutcome {
            reason,
            final_time,
            executed_events,
            state: self.timeline.current_state().clone(),
        })
    }

    /// Schedule every catalog action that is ready right now.
    ///
    /// Readiness is decided for the whole catalog before anything is
    /// scheduled, so every action sees the same timeline.
    fn schedule_ready_actions(&mut self) {
        let ready: Vec<usize> = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, action)| action.ready_to_start(&self.timeline))
            .map(|(i, _)| i)
            .collect();

        let now = self.timeline.current_time();
        for i in ready {
            let action = &self.catalog[i];
            self.timeline.schedule_action(action);
            self.sink.record(Diagnostic::new(
                now,
                DiagnosticKind::ActionScheduled {
                    action: action.object().clone(),
                    events: action.events().len(),
                },
                format!("scheduled action {action} at time {now}"),
            ));
        }
    }

    /// Run the events at `time` in order, threading the state through each
    /// hook, then commit the result as the snapshot at `time`.
    fn execute_timeslot(&mut self, time: Time) -> SimResult<usize> {
        let mut state = self.timeline.current_state().carry_forward();
        let slot = self.timeline.event_slot_mut(time)?;
        let mut ctx = HookContext {
            time,
            rng: &mut self.rng,
        };

        let mut executed = 0;
        for event in slot.iter_mut() {
            state = fire(event, state, &mut ctx)?;
            executed += 1;
            self.sink.record(Diagnostic::new(
                time,
                DiagnosticKind::EventExecuted {
                    event: event.object().clone(),
                },
                format!("executed event {event} at time {time}"),
            ));
        }

        self.timeline.set_state(state, time);
        self.sink.record(Diagnostic::new(
            time,
            DiagnosticKind::StateCommitted { events: executed },
            format!("committed state at time {time}"),
        ));
        Ok(executed)
    }

    /// The simulation's timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current simulated time.
    pub fn current_time(&self) -> Time {
        self.timeline.current_time()
    }

    /// State at the current time.
    pub fn current_state(&self) -> &State {
        self.timeline.current_state()
    }

    /// Events scheduled strictly after the current time.
    pub fn events_to_come(&self) -> Vec<&Event> {
        self.timeline.events_to_come()
    }

    /// The available actions.
    pub fn catalog(&self) -> &[Action] {
        &self.catalog
    }

    /// The run configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The diagnostics sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The diagnostics sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Execute one event with its state bookkeeping: active while the hook
/// runs, completed afterwards.
fn fire(event: &mut Event, mut state: State, ctx: &mut HookContext<'_>) -> SimResult<State> {
    state.activate(event.object().clone());
    let time = ctx.time;
    let mut state = event.fire(state, ctx).map_err(|source| SimError::Hook {
        event: event.name().to_string(),
        time,
        source,
    })?;
    state.complete_event(event.object())?;
    Ok(state)
}
