//! Error taxonomy for the feed engine boundary.
#![forbid(unsafe_code)]

use thiserror::Error;

use stylesense_core::{ParseDirectionError, StoreError};

/// Errors surfaced by the engine's boundary operations.
///
/// Duplicate swipes and vanished items are deliberately *not* represented
/// here: both are expected steady-state occurrences and degrade to success
/// (see [`SwipeOutcome`](crate::SwipeOutcome)). Nothing in this taxonomy is
/// retried internally; the engine is stateless per call, so an external
/// supervisor may retry at its own discretion, except that a
/// [`Persistence`](Self::Persistence) failure during a swipe leaves it
/// unknown whether the swipe was durably recorded.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The swipe direction was neither `like` nor `skip`; rejected before
    /// any state change.
    #[error("invalid swipe direction")]
    InvalidDirection {
        /// Parse failure naming the offending value.
        #[from]
        source: ParseDirectionError,
    },
    /// Caller identity does not match the user being read or updated;
    /// rejected before touching any store.
    #[error("caller identity does not match the requested user")]
    Unauthorized,
    /// A persistence or catalogue collaborator could not be reached after
    /// validation passed.
    #[error("persistence unavailable")]
    Persistence {
        /// Failure reported by the collaborator.
        #[from]
        source: StoreError,
    },
}

impl EngineError {
    /// Report whether the error is the caller's fault (bad input or
    /// identity) as opposed to a server-side failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDirection { .. } | Self::Unauthorized)
    }
}
