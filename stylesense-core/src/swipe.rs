//! Swipe directions and the events they produce.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use thiserror::Error;

use crate::item::ItemId;
use crate::tag::Tag;

/// Direction of a swipe: approval or rejection.
///
/// # Examples
/// ```
/// use stylesense_core::Direction;
///
/// let direction: Direction = "like".parse()?;
/// assert_eq!(direction, Direction::Like);
/// # Ok::<(), stylesense_core::ParseDirectionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    /// The user approved the item.
    Like,
    /// The user rejected the item.
    Skip,
}

impl Direction {
    /// Return the direction as a lowercase `&str`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a direction string is neither `like` nor `skip`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("swipe direction must be 'like' or 'skip', got '{raw}'")]
pub struct ParseDirectionError {
    raw: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "skip" => Ok(Self::Skip),
            _ => Err(ParseDirectionError { raw: s.to_owned() }),
        }
    }
}

/// The durable fact of one swipe, keyed by `(user, item)` in storage.
///
/// Records carry no tags: the uniqueness constraint and history queries
/// need only identity, direction, and time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeRecord {
    /// Item the user swiped on.
    pub item_id: ItemId,
    /// Swipe direction.
    pub direction: Direction,
    /// When the swipe happened, as reported by the caller.
    pub occurred_at: SystemTime,
}

impl SwipeRecord {
    /// Construct a swipe record.
    pub fn new(item_id: ItemId, direction: Direction, occurred_at: SystemTime) -> Self {
        Self {
            item_id,
            direction,
            occurred_at,
        }
    }
}

/// One swipe together with the item's tags captured at swipe time.
///
/// Tags are captured rather than re-derived so replaying historical events
/// reproduces the same affinity updates even if the catalogue re-tags the
/// item later. Events are consumed once by the affinity update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeEvent {
    /// Item the user swiped on.
    pub item_id: ItemId,
    /// Swipe direction.
    pub direction: Direction,
    /// The item's tag list at the time of the swipe.
    pub tags: Vec<Tag>,
    /// When the swipe happened.
    pub occurred_at: SystemTime,
}

impl SwipeEvent {
    /// Construct an event from a recorded swipe and the captured tags.
    pub fn capture(record: SwipeRecord, tags: Vec<Tag>) -> Self {
        Self {
            item_id: record.item_id,
            direction: record.direction,
            tags,
            occurred_at: record.occurred_at,
        }
    }
}
