//! Batch ordering with the cold-start exploration policy.
//!
//! The ranker scores every candidate, then chooses between two orders.
//! Early-life profiles are statistically meaningless: a confident-looking
//! sort over them would only reflect noise, so with too few observed
//! swipes, or when no candidate clears the minimum score, the batch is
//! returned uniformly shuffled instead of sorted.

#![forbid(unsafe_code)]

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use stylesense_core::{AffinityProfile, Item, Scorer, TagAffinityScorer};

/// Thresholds governing when ranking falls back to exploration.
///
/// # Examples
/// ```
/// use stylesense_feed::RankingThresholds;
///
/// let thresholds = RankingThresholds::default();
/// assert_eq!(thresholds.cold_start_swipes, 5);
/// assert_eq!(thresholds.min_score_for_ranking, 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankingThresholds {
    /// Below this many observed swipes the batch is always shuffled.
    pub cold_start_swipes: u64,
    /// When every candidate scores below this value the batch is shuffled
    /// even for a warm user.
    pub min_score_for_ranking: f32,
}

impl RankingThresholds {
    /// Validate the thresholds and return a copy.
    ///
    /// # Errors
    /// Returns [`InvalidRankingThresholds`] when the minimum score is not
    /// finite or falls outside `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, InvalidRankingThresholds> {
        if self.min_score_for_ranking.is_finite()
            && (0.0..=1.0).contains(&self.min_score_for_ranking)
        {
            Ok(self)
        } else {
            Err(InvalidRankingThresholds)
        }
    }
}

impl Default for RankingThresholds {
    fn default() -> Self {
        Self {
            cold_start_swipes: 5,
            min_score_for_ranking: 0.3,
        }
    }
}

/// Error returned by [`RankingThresholds::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("minimum score for ranking must be finite and within 0.0..=1.0")]
pub struct InvalidRankingThresholds;

/// An item paired with the score computed for this ranking request.
///
/// Scores are computed fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoredItem {
    /// The candidate item.
    pub item: Item,
    /// Relevance score in `0.0..=1.0`.
    pub score: f32,
}

/// How the ranker ordered a batch.
///
/// The cold-start condition is a single combined trigger (too few swipes
/// OR uniformly low scores); the mode reports that the fallback was taken
/// without splitting the policy in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    /// Insufficient evidence; the batch was uniformly shuffled.
    ColdStart,
    /// Scores were trusted; the batch is sorted by score descending.
    Ranked,
}

/// An ordered batch together with the mode that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFeed {
    /// Candidates in presentation order.
    pub items: Vec<ScoredItem>,
    /// How the order was produced.
    pub mode: RankingMode,
}

impl RankedFeed {
    /// Report whether the exploration fallback produced this order.
    #[must_use]
    pub const fn is_cold_start(&self) -> bool {
        matches!(self.mode, RankingMode::ColdStart)
    }

    /// Consume the feed and return the ordered items.
    #[must_use]
    pub fn into_items(self) -> Vec<ScoredItem> {
        self.items
    }
}

/// Orders candidate batches for presentation.
///
/// Pure apart from the random source used by the cold-start branch, which
/// the caller supplies: production callers pass a thread-local generator,
/// tests pass a seeded one for reproducible orders.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use stylesense_core::{AffinityProfile, Item, ItemId, Tag};
/// use stylesense_feed::FeedRanker;
///
/// let ranker = FeedRanker::new();
/// let batch = vec![Item::tagged(ItemId::new("i-1"), vec![Tag::new("denim")?])];
/// let profile = AffinityProfile::new();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let feed = ranker.rank(batch, &profile, 0, &mut rng);
/// assert!(feed.is_cold_start());
/// # Ok::<(), stylesense_core::InvalidTagError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeedRanker<S = TagAffinityScorer> {
    scorer: S,
    thresholds: RankingThresholds,
}

impl FeedRanker<TagAffinityScorer> {
    /// Construct a ranker with the default scorer and thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Scorer> FeedRanker<S> {
    /// Construct a ranker around a custom scorer.
    #[must_use]
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            thresholds: RankingThresholds::default(),
        }
    }

    /// Replace the thresholds while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`InvalidRankingThresholds`] when the thresholds fail
    /// validation.
    pub fn with_thresholds(
        mut self,
        thresholds: RankingThresholds,
    ) -> Result<Self, InvalidRankingThresholds> {
        self.thresholds = thresholds.validate()?;
        Ok(self)
    }

    /// The thresholds currently in force.
    #[must_use]
    pub const fn thresholds(&self) -> RankingThresholds {
        self.thresholds
    }

    /// Score and order a candidate batch.
    ///
    /// Every candidate is scored against `profile`. In the cold-start
    /// condition (`observed_swipes` below the threshold, or every score
    /// below the minimum) the computed scores are ignored for ordering
    /// and the batch comes back uniformly shuffled. Otherwise candidates
    /// are sorted by score descending; the sort is stable, so equal scores
    /// keep their original batch order and repeated calls on identical
    /// input produce identical output.
    ///
    /// An empty batch yields an empty feed.
    #[must_use]
    pub fn rank<R>(
        &self,
        candidates: Vec<Item>,
        profile: &AffinityProfile,
        observed_swipes: u64,
        rng: &mut R,
    ) -> RankedFeed
    where
        R: Rng + ?Sized,
    {
        let mut scored: Vec<ScoredItem> = candidates
            .into_iter()
            .map(|item| {
                let score = self.scorer.score(&item, profile);
                ScoredItem { item, score }
            })
            .collect();

        let starved = observed_swipes < self.thresholds.cold_start_swipes;
        let uninformative = scored
            .iter()
            .all(|entry| entry.score < self.thresholds.min_score_for_ranking);
        if starved || uninformative {
            scored.shuffle(rng);
            return RankedFeed {
                items: scored,
                mode: RankingMode::ColdStart,
            };
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        RankedFeed {
            items: scored,
            mode: RankingMode::Ranked,
        }
    }
}
