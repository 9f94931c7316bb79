use crate::Time;
use crate::object::SimId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Error raised by a domain hook. The engine propagates it without inspection.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Alias for `Result<T, HookError>`.
pub type HookResult<T> = Result<T, HookError>;

/// Errors that can occur when manipulating states and timelines.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An item expected among a state's active events was not there.
    #[error("active event not found: \"{name}\" ({id})")]
    ActiveEventNotFound {
        /// The identifier of the missing item.
        id: SimId,
        /// The display name of the missing item.
        name: String,
    },

    /// No events are scheduled at the requested time.
    #[error("no events scheduled at time {0}")]
    NoEventsAt(Time),
}
