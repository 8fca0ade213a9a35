//! Orchestration of swipes and feed requests over the persistence seams.
//!
//! [`FeedEngine`] bridges one boundary call to the collaborator traits:
//! it loads prior state, applies the pure core functions, and hands new
//! state back to storage. It holds no mutable state of its own and never
//! retries; serialising two swipes from the same user is the storage
//! implementation's obligation (see [`stylesense_core::store`]).

#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::time::SystemTime;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stylesense_core::{
    Direction, InvalidLearningConstants, Item, ItemCatalogue, ItemId, LearningConstants,
    ProfileStore, RecordOutcome, Scorer, SwipeEvent, SwipeLog, SwipeRecord, Tag,
    TagAffinityScorer, UserId, affinity,
};

use crate::error::EngineError;
use crate::ranker::{FeedRanker, InvalidRankingThresholds, RankedFeed, RankingThresholds};

/// Feed size served when the caller does not ask for one.
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// Upper bound on the feed size a caller may request.
pub const MAX_FEED_LIMIT: usize = 50;

/// A request for a ranked feed.
///
/// The candidate pool is supplied by the caller, typically the catalogue
/// query result, while `exclude` carries the ids the user has already
/// swiped so they can be dropped before ranking.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeedRequest {
    /// User the feed is for.
    pub user_id: UserId,
    /// Candidate items to rank.
    pub candidates: Vec<Item>,
    /// Item ids to drop before ranking.
    #[serde(default)]
    pub exclude: Vec<ItemId>,
    /// Requested feed size; clamped into `1..=`[`MAX_FEED_LIMIT`].
    #[serde(default)]
    pub limit: Option<usize>,
    /// Optional seed for a reproducible cold-start shuffle. Production
    /// callers leave this unset so the served order is not predictable
    /// across calls.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FeedRequest {
    /// Construct a request with no exclusions and default limit.
    #[must_use]
    pub fn new(user_id: UserId, candidates: Vec<Item>) -> Self {
        Self {
            user_id,
            candidates,
            exclude: Vec::new(),
            limit: None,
            seed: None,
        }
    }

    /// Set the excluded item ids while returning `self` for chaining.
    #[must_use]
    pub fn excluding(mut self, exclude: Vec<ItemId>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set the requested feed size while returning `self` for chaining.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Pin the shuffle seed while returning `self` for chaining.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The effective feed size: requested or default, clamped into
    /// `1..=`[`MAX_FEED_LIMIT`].
    #[must_use]
    pub fn clamped_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT)
    }
}

/// A swipe submission as it arrives from transport.
///
/// The direction travels as a raw string and is validated here, at the
/// boundary, so a bad value is rejected before any state changes. The
/// timestamp is stamped by the caller; the engine never reads the clock.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SwipeRequest {
    /// User submitting the swipe.
    pub user_id: UserId,
    /// Item being swiped.
    pub item_id: ItemId,
    /// Raw direction string, expected to be `like` or `skip`.
    pub direction: String,
    /// When the swipe happened.
    pub occurred_at: SystemTime,
}

impl SwipeRequest {
    /// Construct a swipe submission.
    #[must_use]
    pub fn new(
        user_id: UserId,
        item_id: ItemId,
        direction: impl Into<String>,
        occurred_at: SystemTime,
    ) -> Self {
        Self {
            user_id,
            item_id,
            direction: direction.into(),
            occurred_at,
        }
    }
}

/// What a successful swipe submission did.
///
/// All three variants are success: duplicates and vanished items are
/// expected steady-state occurrences, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The swipe was recorded and the profile updated.
    Applied,
    /// A swipe for this `(user, item)` pair already existed; nothing was
    /// reapplied.
    AlreadyRecorded,
    /// The swipe was recorded but the item had vanished from the
    /// catalogue, so no scoring update was applied.
    RecordedWithoutScoring,
}

/// The orchestration boundary of the taste engine.
///
/// Generic over its collaborators so transports can inject real storage
/// and tests can inject the in-memory implementations from
/// `stylesense_core::test_support`.
///
/// # Examples
/// ```
/// use stylesense_core::test_support::{MemoryCatalogue, MemoryProfileStore, MemorySwipeLog};
/// use stylesense_feed::FeedEngine;
///
/// let engine = FeedEngine::new(
///     MemoryProfileStore::new(),
///     MemorySwipeLog::new(),
///     MemoryCatalogue::new(),
/// );
/// let _ = engine;
/// ```
#[derive(Debug)]
pub struct FeedEngine<P, L, C, S = TagAffinityScorer> {
    profiles: P,
    swipes: L,
    catalogue: C,
    ranker: FeedRanker<S>,
    constants: LearningConstants,
}

impl<P, L, C> FeedEngine<P, L, C>
where
    P: ProfileStore,
    L: SwipeLog,
    C: ItemCatalogue,
{
    /// Construct an engine with the default scorer, constants, and
    /// thresholds.
    #[must_use]
    pub fn new(profiles: P, swipes: L, catalogue: C) -> Self {
        Self {
            profiles,
            swipes,
            catalogue,
            ranker: FeedRanker::new(),
            constants: LearningConstants::default(),
        }
    }
}

impl<P, L, C, S> FeedEngine<P, L, C, S>
where
    P: ProfileStore,
    L: SwipeLog,
    C: ItemCatalogue,
    S: Scorer,
{
    /// Construct an engine around a custom scorer.
    #[must_use]
    pub fn with_scorer(profiles: P, swipes: L, catalogue: C, scorer: S) -> Self {
        Self {
            profiles,
            swipes,
            catalogue,
            ranker: FeedRanker::with_scorer(scorer),
            constants: LearningConstants::default(),
        }
    }

    /// Replace the learning constants while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`InvalidLearningConstants`] when validation fails.
    pub fn with_constants(
        mut self,
        constants: LearningConstants,
    ) -> Result<Self, InvalidLearningConstants> {
        self.constants = constants.validate()?;
        Ok(self)
    }

    /// Replace the ranking thresholds while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`InvalidRankingThresholds`] when validation fails.
    pub fn with_thresholds(
        mut self,
        thresholds: RankingThresholds,
    ) -> Result<Self, InvalidRankingThresholds> {
        self.ranker = self.ranker.with_thresholds(thresholds)?;
        Ok(self)
    }

    /// The learning constants currently in force.
    #[must_use]
    pub const fn constants(&self) -> LearningConstants {
        self.constants
    }

    /// Rank a candidate batch for presentation.
    ///
    /// Loads the user's profile and observed swipe count, drops excluded
    /// candidates, and delegates ordering to the ranker. The result is
    /// truncated to the request's clamped limit.
    ///
    /// # Errors
    /// Returns [`EngineError::Unauthorized`] when `caller` is not the
    /// requested user, and [`EngineError::Persistence`] when a
    /// collaborator fails.
    pub fn get_feed(
        &self,
        caller: &UserId,
        request: FeedRequest,
    ) -> Result<RankedFeed, EngineError> {
        authorise(caller, &request.user_id)?;
        let profile = self.profiles.load(&request.user_id)?.unwrap_or_default();
        let observed = self.swipes.swipe_count(&request.user_id)?;
        let limit = request.clamped_limit();

        let excluded: HashSet<ItemId> = request.exclude.iter().cloned().collect();
        let candidates: Vec<Item> = request
            .candidates
            .into_iter()
            .filter(|item| !excluded.contains(&item.id))
            .collect();

        let mut feed = match request.seed {
            Some(seed) => self.ranker.rank(
                candidates,
                &profile,
                observed,
                &mut ChaCha8Rng::seed_from_u64(seed),
            ),
            None => self
                .ranker
                .rank(candidates, &profile, observed, &mut rand::thread_rng()),
        };
        if feed.is_cold_start() {
            log::debug!(
                "serving cold-start order to user {} ({observed} swipes observed)",
                request.user_id
            );
        }
        feed.items.truncate(limit);
        Ok(feed)
    }

    /// Process one swipe end to end.
    ///
    /// Validates the direction, durably records the swipe, loads the
    /// item's tags and the user's profile, applies the affinity update,
    /// and saves the profile back wholesale. Duplicate submissions for
    /// the same `(user, item)` pair and items deleted after being shown
    /// both return success without reapplying anything.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidDirection`] for a bad direction
    /// string, [`EngineError::Unauthorized`] for an identity mismatch
    /// (both before any state change), and [`EngineError::Persistence`]
    /// when a collaborator fails. In the persistence case the swipe may or
    /// may not have been durably recorded; retry policy belongs to the
    /// caller.
    pub fn submit_swipe(
        &self,
        caller: &UserId,
        request: SwipeRequest,
    ) -> Result<SwipeOutcome, EngineError> {
        let direction: Direction = request.direction.parse()?;
        authorise(caller, &request.user_id)?;

        let record = SwipeRecord::new(request.item_id.clone(), direction, request.occurred_at);
        if self.swipes.record(&request.user_id, &record)? == RecordOutcome::Duplicate {
            log::debug!(
                "duplicate swipe from user {} on item {} ignored",
                request.user_id,
                request.item_id
            );
            return Ok(SwipeOutcome::AlreadyRecorded);
        }

        let Some(item) = self.catalogue.item(&request.item_id)? else {
            // Data-quality signal: the item was shown but has since gone.
            log::warn!(
                "item {} vanished from the catalogue; swipe recorded without scoring",
                request.item_id
            );
            return Ok(SwipeOutcome::RecordedWithoutScoring);
        };

        let current = self.profiles.load(&request.user_id)?.unwrap_or_default();
        let event = SwipeEvent::capture(record, item.tags);
        let updated = affinity::apply_event(&current, &event, self.constants);
        self.profiles.save(&request.user_id, &updated)?;
        Ok(SwipeOutcome::Applied)
    }

    /// Return the user's strongest affinities for display ("Style DNA").
    ///
    /// Sorted by score descending with an exact lexicographic-ascending
    /// tie-break, so repeated calls never flicker between equal tags.
    ///
    /// # Errors
    /// Returns [`EngineError::Unauthorized`] when `caller` is not the
    /// requested user, and [`EngineError::Persistence`] when the profile
    /// store fails.
    pub fn affinity_summary(
        &self,
        caller: &UserId,
        user: &UserId,
        top_n: usize,
    ) -> Result<Vec<(Tag, f32)>, EngineError> {
        authorise(caller, user)?;
        let profile = self.profiles.load(user)?.unwrap_or_default();
        Ok(profile.top_tags(top_n))
    }

    /// Return the items the user liked, most recent first.
    ///
    /// Items deleted from the catalogue since the swipe are silently
    /// dropped, so the result may be shorter than `limit`.
    ///
    /// # Errors
    /// Returns [`EngineError::Unauthorized`] when `caller` is not the
    /// requested user, and [`EngineError::Persistence`] when a
    /// collaborator fails.
    pub fn liked_history(
        &self,
        caller: &UserId,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<Item>, EngineError> {
        authorise(caller, user)?;
        let ids = self.swipes.liked_item_ids(user, limit)?;
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(item) = self.catalogue.item(&id)? {
                items.push(item);
            }
        }
        Ok(items)
    }
}

fn authorise(caller: &UserId, user: &UserId) -> Result<(), EngineError> {
    if caller == user {
        Ok(())
    } else {
        Err(EngineError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stylesense_core::AffinityProfile;
    use stylesense_core::test_support::{
        MemoryCatalogue, MemoryProfileStore, MemorySwipeLog, UnavailableStore,
    };

    fn tag(name: &str) -> Tag {
        Tag::new(name).expect("valid tag")
    }

    fn item(id: &str, tags: &[&str]) -> Item {
        Item::tagged(ItemId::new(id), tags.iter().map(|t| tag(t)).collect())
    }

    fn engine() -> FeedEngine<MemoryProfileStore, MemorySwipeLog, MemoryCatalogue> {
        FeedEngine::new(
            MemoryProfileStore::new(),
            MemorySwipeLog::new(),
            MemoryCatalogue::with_items([
                item("i-1", &["streetwear", "black"]),
                item("i-2", &["streetwear"]),
                item("i-3", &["floral"]),
            ]),
        )
    }

    fn swipe(user: &str, item_id: &str, direction: &str) -> SwipeRequest {
        SwipeRequest::new(
            UserId::new(user),
            ItemId::new(item_id),
            direction,
            SystemTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn unauthorised_caller_is_rejected_before_any_store_call() {
        let unreachable_engine =
            FeedEngine::new(UnavailableStore, UnavailableStore, UnavailableStore);
        let err = unreachable_engine
            .submit_swipe(&UserId::new("mallory"), swipe("alice", "i-1", "like"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Unauthorized));
    }

    #[test]
    fn invalid_direction_is_rejected_before_recording() {
        let engine = engine();
        let user = UserId::new("alice");
        let err = engine
            .submit_swipe(&user, swipe("alice", "i-1", "sideways"))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDirection { .. }));
        assert!(err.is_client_error());
        let summary = engine.affinity_summary(&user, &user, 10).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn like_records_and_updates_profile() {
        let engine = engine();
        let user = UserId::new("alice");
        let outcome = engine
            .submit_swipe(&user, swipe("alice", "i-1", "like"))
            .unwrap();
        assert_eq!(outcome, SwipeOutcome::Applied);
        let summary = engine.affinity_summary(&user, &user, 10).unwrap();
        assert_eq!(summary.len(), 2);
        for (_, score) in &summary {
            assert!((score - 0.15).abs() < 1e-6);
        }
    }

    #[test]
    fn duplicate_swipe_is_an_idempotent_success() {
        let engine = engine();
        let user = UserId::new("alice");
        engine
            .submit_swipe(&user, swipe("alice", "i-1", "like"))
            .unwrap();
        let after_first = engine.affinity_summary(&user, &user, 10).unwrap();

        let outcome = engine
            .submit_swipe(&user, swipe("alice", "i-1", "like"))
            .unwrap();
        assert_eq!(outcome, SwipeOutcome::AlreadyRecorded);
        let after_second = engine.affinity_summary(&user, &user, 10).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn vanished_item_still_counts_as_a_recorded_swipe() {
        let engine = engine();
        let user = UserId::new("alice");
        let outcome = engine
            .submit_swipe(&user, swipe("alice", "i-404", "like"))
            .unwrap();
        assert_eq!(outcome, SwipeOutcome::RecordedWithoutScoring);
        let summary = engine.affinity_summary(&user, &user, 10).unwrap();
        assert!(summary.is_empty());

        // The recorded swipe still advances the cold-start counter.
        let feed = engine
            .get_feed(
                &user,
                FeedRequest::new(UserId::new("alice"), vec![item("i-2", &["streetwear"])])
                    .with_seed(1),
            )
            .unwrap();
        assert!(feed.is_cold_start());
    }

    #[test]
    fn profile_store_failure_surfaces_as_persistence_error() {
        let failing = FeedEngine::new(
            UnavailableStore,
            MemorySwipeLog::new(),
            MemoryCatalogue::with_items([item("i-1", &["streetwear"])]),
        );
        let user = UserId::new("alice");
        let err = failing
            .submit_swipe(&user, swipe("alice", "i-1", "like"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Persistence { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn get_feed_drops_excluded_candidates() {
        let engine = engine();
        let user = UserId::new("alice");
        let request = FeedRequest::new(
            user.clone(),
            vec![
                item("i-1", &["streetwear", "black"]),
                item("i-2", &["streetwear"]),
            ],
        )
        .excluding(vec![ItemId::new("i-1")])
        .with_seed(9);
        let feed = engine.get_feed(&user, request).unwrap();
        let ids: Vec<&str> = feed.items.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, ["i-2"]);
    }

    #[rstest]
    #[case(None, 3)]
    #[case(Some(2), 2)]
    #[case(Some(0), 1)]
    #[case(Some(500), 3)]
    fn get_feed_clamps_the_requested_limit(
        #[case] limit: Option<usize>,
        #[case] expected: usize,
    ) {
        let engine = engine();
        let user = UserId::new("alice");
        let mut request = FeedRequest::new(
            user.clone(),
            vec![
                item("i-1", &["streetwear"]),
                item("i-2", &["black"]),
                item("i-3", &["floral"]),
            ],
        )
        .with_seed(3);
        request.limit = limit;
        let feed = engine.get_feed(&user, request).unwrap();
        assert_eq!(feed.items.len(), expected);
    }

    #[test]
    fn seeded_feed_is_reproducible() {
        let engine = engine();
        let user = UserId::new("alice");
        let candidates = vec![
            item("i-1", &["streetwear"]),
            item("i-2", &["black"]),
            item("i-3", &["floral"]),
        ];
        let order = |seed: u64| {
            let request = FeedRequest::new(user.clone(), candidates.clone()).with_seed(seed);
            let feed = engine.get_feed(&user, request).unwrap();
            feed.items
                .iter()
                .map(|s| s.item.id.as_str().to_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(order(42), order(42));
    }

    #[test]
    fn feed_request_deserialises_with_defaults() {
        let json = r#"{"user_id":"alice","candidates":[]}"#;
        let request: FeedRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id, UserId::new("alice"));
        assert_eq!(request.clamped_limit(), DEFAULT_FEED_LIMIT);
        assert!(request.exclude.is_empty());
        assert!(request.seed.is_none());
    }

    #[test]
    fn affinity_summary_tie_breaks_lexicographically() {
        let user = UserId::new("alice");
        let profile = AffinityProfile::new()
            .with_score(tag("xyz"), 0.5)
            .with_score(tag("abc"), 0.5);
        let seeded_engine = FeedEngine::new(
            MemoryProfileStore::with_profile(user.clone(), profile),
            MemorySwipeLog::new(),
            MemoryCatalogue::new(),
        );
        let summary = seeded_engine.affinity_summary(&user, &user, 2).unwrap();
        let names: Vec<&str> = summary.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(names, ["abc", "xyz"]);
    }

    #[test]
    fn liked_history_drops_deleted_items() {
        let catalogue = MemoryCatalogue::with_items([
            item("i-1", &["streetwear"]),
            item("i-2", &["black"]),
            item("i-3", &["floral"]),
        ]);
        let engine = FeedEngine::new(MemoryProfileStore::new(), MemorySwipeLog::new(), catalogue);
        let user = UserId::new("alice");
        engine
            .submit_swipe(&user, swipe("alice", "i-1", "like"))
            .unwrap();
        engine
            .submit_swipe(&user, swipe("alice", "i-2", "skip"))
            .unwrap();
        engine
            .submit_swipe(&user, swipe("alice", "i-3", "like"))
            .unwrap();
        engine.catalogue.remove(&ItemId::new("i-1"));

        let history = engine.liked_history(&user, &user, 100).unwrap();
        let ids: Vec<&str> = history.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["i-3"]);
    }
}
