use std::collections::VecDeque;

use kairos_core::{SimObject, Time};

use crate::simulation::Termination;

/// What kind of diagnostic was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A run began.
    RunStarted {
        /// The configured maximum duration.
        max_duration: Time,
    },
    /// An action was found ready and put on the timeline.
    ActionScheduled {
        /// The scheduled action.
        action: SimObject,
        /// Number of events it enqueued.
        events: usize,
    },
    /// An event's hook ran.
    EventExecuted {
        /// The executed event.
        event: SimObject,
    },
    /// A timeslot finished and its resulting state was recorded.
    StateCommitted {
        /// Number of events executed in the timeslot.
        events: usize,
    },
    /// A run ended normally.
    Finished {
        /// Why the run stopped.
        reason: Termination,
    },
}

/// A record of something the engine did.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The simulated time it happened at.
    pub time: Time,
    /// The specific kind of diagnostic.
    pub kind: DiagnosticKind,
    /// A human-readable description.
    pub description: String,
}

impl Diagnostic {
    /// Create a diagnostic with the given time, kind, and description.
    pub fn new(time: Time, kind: DiagnosticKind, description: impl Into<String>) -> Self {
        Self {
            time,
            kind,
            description: description.into(),
        }
    }
}

/// Receives the engine's diagnostics.
///
/// The engine never logs on its own; everything it reports goes through the
/// sink it was built with.
pub trait DiagnosticsSink {
    /// Accept one diagnostic.
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Discards everything.
impl DiagnosticsSink for () {
    fn record(&mut self, _diagnostic: Diagnostic) {}
}

/// Forwards every diagnostic to both sinks.
impl<A: DiagnosticsSink, B: DiagnosticsSink> DiagnosticsSink for (A, B) {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.0.record(diagnostic.clone());
        self.1.record(diagnostic);
    }
}

/// In-memory record of a run, newest last.
///
/// With a non-zero capacity the log keeps only the most recent entries.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: VecDeque<Diagnostic>,
    capacity: usize,
}

impl DiagnosticLog {
    /// Create a log holding at most `capacity` entries (0 = unlimited).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Recorded diagnostics, oldest first.
    pub fn entries(&self) -> &VecDeque<Diagnostic> {
        &self.entries
    }

    /// Diagnostics recorded at `time`.
    pub fn at_time(&self, time: Time) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.time == time)
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, for reuse across runs.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn record(&mut self, diagnostic: Diagnostic) {
        if self.capacity > 0 && self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(diagnostic);
    }
}

/// Emits diagnostics as `tracing` events.
///
/// Run boundaries go out at `info`, per-item records at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            time,
            kind,
            description,
        } = diagnostic;
        match kind {
            DiagnosticKind::RunStarted { max_duration } => {
                tracing::info!(time, max_duration, "{description}");
            }
            DiagnosticKind::Finished { reason } => {
                tracing::info!(time, %reason, "{description}");
            }
            DiagnosticKind::ActionScheduled { action, events } => {
                tracing::debug!(time, action = %action, events, "{description}");
            }
            DiagnosticKind::EventExecuted { event } => {
                tracing::debug!(time, event = %event, "{description}");
            }
            DiagnosticKind::StateCommitted { events } => {
                tracing::debug!(time, events, "{description}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executed(time: Time, event: &SimObject) -> Diagnostic {
        Diagnostic::new(
            time,
            DiagnosticKind::EventExecuted {
                event: event.clone(),
            },
            "test",
        )
    }

    #[test]
    fn log_record_and_query() {
        let mut log = DiagnosticLog::new(0);
        let splash = SimObject::new("splash");
        log.record(executed(3, &splash));
        log.record(executed(5, &splash));
        assert_eq!(log.len(), 2);
        assert_eq!(log.at_time(3).count(), 1);
        assert_eq!(log.at_time(4).count(), 0);
    }

    #[test]
    fn log_max_entries_trims() {
        let mut log = DiagnosticLog::new(2);
        let splash = SimObject::new("splash");
        for t in 0..5 {
            log.record(executed(t, &splash));
        }
        assert_eq!(log.len(), 2);
        // Oldest entries were dropped, newest remain
        assert_eq!(log.entries()[0].time, 3);
        assert_eq!(log.entries()[1].time, 4);
    }

    #[test]
    fn log_unlimited_capacity() {
        let mut log = DiagnosticLog::new(0);
        let splash = SimObject::new("splash");
        for t in 0..1000 {
            log.record(executed(t, &splash));
        }
        assert_eq!(log.len(), 1000);
    }

    #[test]
    fn log_clear() {
        let mut log = DiagnosticLog::new(0);
        log.record(executed(1, &SimObject::new("splash")));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn full_log_stays_at_capacity() {
        let mut log = DiagnosticLog::new(3);
        let splash = SimObject::new("splash");
        for t in 0..10_000 {
            log.record(executed(t, &splash));
            assert!(log.len() <= 3);
        }
        let times: Vec<Time> = log.entries().iter().map(|d| d.time).collect();
        assert_eq!(times, vec![9_997, 9_998, 9_999]);
    }

    #[test]
    fn pair_sink_fans_out() {
        let mut pair = (DiagnosticLog::new(0), DiagnosticLog::new(1));
        let splash = SimObject::new("splash");
        pair.record(executed(1, &splash));
        pair.record(executed(2, &splash));
        assert_eq!(pair.0.len(), 2);
        assert_eq!(pair.1.len(), 1);
        assert_eq!(pair.1.entries()[0].time, 2);
    }

    #[test]
    fn unit_and_tracing_sinks_accept_everything() {
        let splash = SimObject::new("splash");
        ().record(executed(1, &splash));
        TracingSink.record(executed(1, &splash));
        TracingSink.record(Diagnostic::new(
            1,
            DiagnosticKind::Finished {
                reason: Termination::MaxDurationReached,
            },
            "done",
        ));
    }
}
