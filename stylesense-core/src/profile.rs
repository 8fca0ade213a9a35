//! Per-user affinity profiles: bounded taste scores keyed by tag.
//!
//! A profile owns one user's learned taste. Scores live in the closed
//! interval `[0.0, 1.0]`; a tag that has never been touched by a swipe is
//! not materialised and reads as [`NEUTRAL_SCORE`] when scoring.

use std::collections::BTreeMap;
use std::fmt;

use crate::tag::Tag;
use crate::vocabulary::TagVocabulary;

/// Score assumed for tags absent from a profile.
pub const NEUTRAL_SCORE: f32 = 0.5;

/// Score seeded for tags selected during onboarding.
pub const ONBOARDING_SEED_SCORE: f32 = 0.65;

/// Opaque identifier of a user profile.
///
/// # Examples
/// ```
/// use stylesense_core::UserId;
///
/// let user = UserId::new("u-123");
/// assert_eq!(user.as_str(), "u-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct UserId(String);

impl UserId {
    /// Wrap an opaque user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's taste, as a bounded score per taxonomy tag.
///
/// The map is owned by exactly one user and mutated only through the swipe
/// update in [`affinity`](crate::affinity); ranking reads it concurrently
/// without coordination because updates always replace the map wholesale.
///
/// # Examples
/// ```
/// use stylesense_core::{AffinityProfile, NEUTRAL_SCORE, Tag};
///
/// let tag = Tag::new("minimalist")?;
/// let profile = AffinityProfile::new().with_score(tag.clone(), 0.8);
/// assert_eq!(profile.score(&tag), Some(0.8));
/// assert_eq!(profile.score_or_neutral(&Tag::new("linen")?), NEUTRAL_SCORE);
/// # Ok::<(), stylesense_core::InvalidTagError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AffinityProfile {
    scores: BTreeMap<Tag, f32>,
}

impl AffinityProfile {
    /// Construct an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from a pre-computed score map, clamping each entry
    /// into `0.0..=1.0`.
    pub fn from_scores(scores: BTreeMap<Tag, f32>) -> Self {
        let scores = scores
            .into_iter()
            .map(|(tag, score)| (tag, clamp_score(score)))
            .collect();
        Self { scores }
    }

    /// Seed a profile from onboarding selections.
    ///
    /// Raw selections are normalised through `vocabulary`; values outside
    /// the vocabulary are skipped. Each surviving tag starts at
    /// [`ONBOARDING_SEED_SCORE`].
    pub fn from_onboarding<'a, I>(vocabulary: &TagVocabulary, selections: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let scores = vocabulary
            .normalise_all(selections)
            .into_iter()
            .map(|tag| (tag, ONBOARDING_SEED_SCORE))
            .collect();
        Self { scores }
    }

    /// Return the materialised score for a tag, if present.
    pub fn score(&self, tag: &Tag) -> Option<f32> {
        self.scores.get(tag).copied()
    }

    /// Return the score for a tag, falling back to [`NEUTRAL_SCORE`].
    pub fn score_or_neutral(&self, tag: &Tag) -> f32 {
        self.score(tag).unwrap_or(NEUTRAL_SCORE)
    }

    /// Insert or update a tag score, clamped into `0.0..=1.0`.
    pub fn set_score(&mut self, tag: Tag, score: f32) {
        self.scores.insert(tag, clamp_score(score));
    }

    /// Add a tag score while returning `self` for chaining.
    pub fn with_score(mut self, tag: Tag, score: f32) -> Self {
        self.set_score(tag, score);
        self
    }

    /// Number of materialised tag scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Report whether any scores are materialised.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate over materialised `(tag, score)` entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, f32)> {
        self.scores.iter().map(|(tag, score)| (tag, *score))
    }

    /// Return the `top_n` strongest affinities.
    ///
    /// Sorted by score descending; equal scores tie-break by tag name
    /// ascending. The tie-break is user-visible ("Style DNA") and must not
    /// flicker between calls, so it is exact rather than map-order
    /// dependent.
    ///
    /// # Examples
    /// ```
    /// use stylesense_core::{AffinityProfile, Tag};
    ///
    /// let profile = AffinityProfile::new()
    ///     .with_score(Tag::new("xyz")?, 0.5)
    ///     .with_score(Tag::new("abc")?, 0.5);
    /// let top = profile.top_tags(2);
    /// assert_eq!(top[0].0.as_str(), "abc");
    /// # Ok::<(), stylesense_core::InvalidTagError>(())
    /// ```
    pub fn top_tags(&self, top_n: usize) -> Vec<(Tag, f32)> {
        let mut entries: Vec<(Tag, f32)> = self
            .scores
            .iter()
            .map(|(tag, score)| (tag.clone(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(top_n);
        entries
    }

    /// Consume the profile and return the underlying map.
    pub fn into_inner(self) -> BTreeMap<Tag, f32> {
        self.scores
    }
}

fn clamp_score(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
