//! Discrete-event run loop for Kairos.
//!
//! [`DiscreteSimulation`] owns a [`kairos_core::Timeline`] and a catalog of
//! actions. Each iteration schedules every ready action, then executes the
//! next due timeslot of events, until the schedule drains or the next event
//! lies beyond the configured maximum duration.

/// Configuration types for simulation runs.
pub mod config;
/// Injected diagnostics: sinks and the in-memory diagnostics log.
pub mod diagnostics;
/// Error types for the engine crate.
pub mod error;
/// The run loop.
pub mod simulation;

/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of the diagnostics types.
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticsSink, TracingSink};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of the run loop types.
pub use simulation::{DiscreteSimulation, RunOutcome, Termination};
