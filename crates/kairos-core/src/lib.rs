//! Core types for Kairos: the data model of a discrete-event simulation.
//!
//! A [`Timeline`] indexes scheduled [`Action`]s and [`Event`]s by simulated
//! time and keeps one [`State`] snapshot per executed time point. Items that
//! share a time point are grouped in a weight-ordered [`Timeslot`]. The run
//! loop that drives all of this lives in `kairos-engine`.

/// Actions: schedulable units that enqueue events at future offsets.
pub mod action;
/// Error types used throughout the crate.
pub mod error;
/// Events: units of state mutation carrying a hook.
pub mod event;
/// Identity shared by every scheduled thing.
pub mod object;
/// Simulation state snapshots and dynamic values.
pub mod state;
/// The time-indexed ledger of actions, events, and states.
pub mod timeline;
/// Weight-bucketed, insertion-ordered collections for one time point.
pub mod timeslot;

/// Re-export action types.
pub use action::{Action, ActionBehavior, BasicAction};
/// Re-export error types.
pub use error::{CoreError, CoreResult, HookError, HookResult};
/// Re-export event types.
pub use event::{Event, EventHook, HookContext};
/// Re-export identity types.
pub use object::{SimId, SimObject};
/// Re-export state types.
pub use state::{State, Value, Values};
/// Re-export the timeline.
pub use timeline::Timeline;
/// Re-export the timeslot.
pub use timeslot::Timeslot;

/// A point in simulated time.
pub type Time = u64;

/// An offset between two points in simulated time.
pub type Timedelta = u64;

/// Execution-order weight within a time point. Higher runs first.
pub type Weight = i64;

/// Weight given to actions and events that do not ask for one.
pub const BASELINE_WEIGHT: Weight = 0;
