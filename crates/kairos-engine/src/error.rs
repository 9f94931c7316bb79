use kairos_core::{CoreError, HookError, Time};

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that abort a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A state or timeline operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A domain hook returned an error. The source is kept as the hook raised it.
    #[error("hook of event \"{event}\" failed at time {time}")]
    Hook {
        /// Display name of the failing event.
        event: String,
        /// Simulated time the event was executing at.
        time: Time,
        /// The error returned by the hook.
        #[source]
        source: HookError,
    },
}
