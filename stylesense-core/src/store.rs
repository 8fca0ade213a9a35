//! Persistence-collaborator traits the orchestration layer depends on.
//!
//! The engine never performs I/O itself: durable storage of profiles and
//! swipes and catalogue lookups are behind these traits. Implementations
//! own all blocking; the engine treats each call as an opaque suspend
//! point.
//!
//! Two swipes from the same user must be serialised by the implementation
//! with respect to the profile's read-modify-write cycle (a per-user
//! transaction boundary or an optimistic retry loop), otherwise a lost
//! update can discard one swipe's effect. Different users never need
//! coordination.

use std::error::Error;
use std::fmt;

use thiserror::Error as ThisError;

use crate::item::{Item, ItemId};
use crate::profile::{AffinityProfile, UserId};
use crate::swipe::SwipeRecord;

/// Failure to reach or use durable storage.
///
/// Deliberately opaque: the engine maps any store failure to its
/// server-error category and never retries internally, so the only
/// information it needs is which operation failed and, for logs, the
/// underlying cause.
#[derive(Debug, ThisError)]
#[error("persistence unavailable during {operation}")]
pub struct StoreError {
    operation: &'static str,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl StoreError {
    /// Construct an error with no underlying cause.
    pub fn unavailable(operation: &'static str) -> Self {
        Self {
            operation,
            source: None,
        }
    }

    /// Construct an error wrapping an underlying driver failure.
    pub fn with_source(
        operation: &'static str,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            operation,
            source: Some(Box::new(source)),
        }
    }

    /// The operation that failed, for logging and telemetry.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Outcome of durably recording a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The swipe was stored for the first time.
    Recorded,
    /// A swipe for this `(user, item)` pair already existed; the store
    /// changed nothing.
    Duplicate,
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recorded => f.write_str("recorded"),
            Self::Duplicate => f.write_str("duplicate"),
        }
    }
}

/// Durable storage of per-user affinity profiles.
///
/// Saves replace the stored profile wholesale (last writer wins at
/// whole-map granularity); no partial-tag merge is defined.
pub trait ProfileStore {
    /// Load a user's profile, or `None` for a user with no profile yet.
    ///
    /// # Errors
    /// Returns [`StoreError`] when storage cannot be reached.
    fn load(&self, user: &UserId) -> Result<Option<AffinityProfile>, StoreError>;

    /// Replace a user's stored profile.
    ///
    /// # Errors
    /// Returns [`StoreError`] when storage cannot be reached.
    fn save(&self, user: &UserId, profile: &AffinityProfile) -> Result<(), StoreError>;
}

/// Durable log of swipes, unique per `(user, item)` pair.
pub trait SwipeLog {
    /// Record a swipe, reporting whether it was new or a duplicate.
    ///
    /// The uniqueness constraint is owned here: a second record for the
    /// same `(user, item)` pair must return
    /// [`RecordOutcome::Duplicate`] without changing stored state.
    ///
    /// # Errors
    /// Returns [`StoreError`] when storage cannot be reached.
    fn record(&self, user: &UserId, swipe: &SwipeRecord) -> Result<RecordOutcome, StoreError>;

    /// Number of swipes recorded for a user.
    ///
    /// # Errors
    /// Returns [`StoreError`] when storage cannot be reached.
    fn swipe_count(&self, user: &UserId) -> Result<u64, StoreError>;

    /// Item ids the user liked, most recent first, at most `limit`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when storage cannot be reached.
    fn liked_item_ids(&self, user: &UserId, limit: usize) -> Result<Vec<ItemId>, StoreError>;
}

/// Read-only access to the item catalogue.
pub trait ItemCatalogue {
    /// Fetch an item by id, or `None` when it no longer exists.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the catalogue cannot be reached.
    fn item(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;
}
