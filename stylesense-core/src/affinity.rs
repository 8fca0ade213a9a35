//! The swipe update rule: decay, boost/penalty, clamp.
//!
//! [`update`] is the only way an [`AffinityProfile`] changes in response to
//! feedback. It is a pure function: no I/O, no randomness, no clock. Given
//! the same inputs it always produces the same output, which keeps
//! historical updates replayable.

use thiserror::Error;

use crate::profile::AffinityProfile;
use crate::swipe::{Direction, SwipeEvent};
use crate::tag::Tag;

/// Tunable constants driving the swipe update.
///
/// Injected explicitly rather than read from ambient state so callers can
/// experiment per cohort and tests can pin exact values.
///
/// # Examples
/// ```
/// use stylesense_core::LearningConstants;
///
/// let constants = LearningConstants::default();
/// assert_eq!(constants.like_boost, 0.15);
/// assert_eq!(constants.skip_penalty, 0.05);
/// assert_eq!(constants.decay_factor, 0.98);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearningConstants {
    /// Added to each swiped tag on a like.
    pub like_boost: f32,
    /// Subtracted from each swiped tag on a skip.
    pub skip_penalty: f32,
    /// Multiplier applied to every existing score before the adjustment.
    pub decay_factor: f32,
}

impl LearningConstants {
    /// Validate the constants and return a copy.
    ///
    /// # Errors
    /// Returns [`InvalidLearningConstants`] when any value is not finite,
    /// an adjustment is negative, or the decay factor falls outside
    /// `(0.0, 1.0]`.
    pub fn validate(self) -> Result<Self, InvalidLearningConstants> {
        let finite =
            self.like_boost.is_finite() && self.skip_penalty.is_finite() && self.decay_factor.is_finite();
        let non_negative = self.like_boost >= 0.0 && self.skip_penalty >= 0.0;
        let decay_in_range = self.decay_factor > 0.0 && self.decay_factor <= 1.0;
        if finite && non_negative && decay_in_range {
            Ok(self)
        } else {
            Err(InvalidLearningConstants)
        }
    }
}

impl Default for LearningConstants {
    fn default() -> Self {
        Self {
            like_boost: 0.15,
            skip_penalty: 0.05,
            decay_factor: 0.98,
        }
    }
}

/// Error returned by [`LearningConstants::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("learning constants must be finite and non-negative, with decay in (0.0, 1.0]")]
pub struct InvalidLearningConstants;

/// Compute the profile resulting from one swipe.
///
/// The caller's profile is never mutated; audit and undo flows may retain
/// it. The steps run in strict order:
///
/// 1. every existing entry is multiplied by `decay_factor`, so old signal
///    weakens with every subsequent swipe whether or not it is touched;
/// 2. each tag in `swiped_tags` is seeded at `0.0` when absent, then
///    boosted (like) or penalised (skip);
/// 3. every entry is clamped into `0.0..=1.0`.
///
/// An empty `swiped_tags` degenerates to a pure decay step and materialises
/// no new entries. Repeated skips on a low tag saturate at exactly `0.0`.
///
/// # Examples
/// ```
/// use stylesense_core::{affinity, AffinityProfile, Direction, LearningConstants, Tag};
///
/// let minimalist = Tag::new("minimalist")?;
/// let black = Tag::new("black")?;
/// let before = AffinityProfile::new().with_score(minimalist.clone(), 0.5);
/// let after = affinity::update(
///     &before,
///     &[minimalist.clone(), black.clone()],
///     Direction::Like,
///     LearningConstants::default(),
/// );
/// assert!((after.score(&minimalist).unwrap() - 0.64).abs() < 1e-6);
/// assert!((after.score(&black).unwrap() - 0.15).abs() < 1e-6);
/// # Ok::<(), stylesense_core::InvalidTagError>(())
/// ```
pub fn update(
    current: &AffinityProfile,
    swiped_tags: &[Tag],
    direction: Direction,
    constants: LearningConstants,
) -> AffinityProfile {
    let mut scores: std::collections::BTreeMap<Tag, f32> = current
        .iter()
        .map(|(tag, score)| (tag.clone(), score * constants.decay_factor))
        .collect();

    for tag in swiped_tags {
        let entry = scores.entry(tag.clone()).or_insert(0.0);
        *entry = match direction {
            Direction::Like => *entry + constants.like_boost,
            Direction::Skip => *entry - constants.skip_penalty,
        };
    }

    // from_scores clamps every entry into [0.0, 1.0].
    AffinityProfile::from_scores(scores)
}

/// Apply a captured [`SwipeEvent`] to a profile.
///
/// Convenience over [`update`] for callers holding a full event; uses the
/// tags captured at swipe time, not the item's current tags.
pub fn apply_event(
    current: &AffinityProfile,
    event: &SwipeEvent,
    constants: LearningConstants,
) -> AffinityProfile {
    update(current, &event.tags, event.direction, constants)
}
