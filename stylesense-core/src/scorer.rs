//! Score catalogue items against a user's affinity profile.
//!
//! The [`Scorer`] trait assigns a relevance score to an
//! [`Item`](crate::Item) given an [`AffinityProfile`](crate::AffinityProfile).

use crate::item::Item;
use crate::profile::{AffinityProfile, NEUTRAL_SCORE};
use crate::tag::Tag;

/// Calculate a relevance score for a catalogue item.
///
/// Higher scores indicate a better match with the user's learned taste.
/// Implementations must be thread-safe (`Send` + `Sync`) so scorers can run
/// across threads. The method is infallible; implementers return a neutral
/// or zero score when no information is available.
///
/// Implementations must:
/// - Produce finite (`f32::is_finite`) scores.
/// - Return non-negative values.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use stylesense_core::{AffinityProfile, Item, ItemId, Scorer};
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(&self, _item: &Item, _profile: &AffinityProfile) -> f32 {
///         1.0
///     }
/// }
///
/// let item = Item::untagged(ItemId::new("i-1"));
/// let profile = AffinityProfile::new();
/// assert_eq!(UnitScorer.score(&item, &profile), 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `item` according to `profile`.
    fn score(&self, item: &Item, profile: &AffinityProfile) -> f32;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f32) -> f32
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

/// The fixed, explainable scorer: arithmetic mean of per-tag affinity.
///
/// An untagged item scores exactly [`NEUTRAL_SCORE`], neither promoted nor
/// demoted. Otherwise the score is the mean of the profile's score for
/// each tag, with absent tags reading as neutral. Deliberately a plain
/// linear average rather than a weighted or learned model, so behaviour
/// stays auditable.
///
/// # Examples
/// ```
/// use stylesense_core::{AffinityProfile, Item, ItemId, Scorer, Tag, TagAffinityScorer};
///
/// let liked = Tag::new("minimalist")?;
/// let unseen = Tag::new("linen")?;
/// let profile = AffinityProfile::new().with_score(liked.clone(), 0.9);
/// let item = Item::tagged(ItemId::new("i-1"), vec![liked, unseen]);
/// // (0.9 + 0.5) / 2
/// assert!((TagAffinityScorer.score(&item, &profile) - 0.7).abs() < 1e-6);
/// # Ok::<(), stylesense_core::InvalidTagError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TagAffinityScorer;

impl Scorer for TagAffinityScorer {
    fn score(&self, item: &Item, profile: &AffinityProfile) -> f32 {
        if item.tags.is_empty() {
            return NEUTRAL_SCORE;
        }
        let total: f32 = item
            .tags
            .iter()
            .map(|tag: &Tag| profile.score_or_neutral(tag))
            .sum();
        Self::sanitise(total / item.tags.len() as f32)
    }
}
