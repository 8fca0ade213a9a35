//! Facade crate for the StyleSense taste engine.
//!
//! This crate re-exports the core domain types and the feed orchestration
//! layer so applications depend on a single crate.

#![forbid(unsafe_code)]

pub use stylesense_core::{
    AffinityProfile, Dimension, Direction, InvalidLearningConstants, InvalidTagError, Item,
    ItemCatalogue, ItemId, ItemMetadata, LearningConstants, NEUTRAL_SCORE, ONBOARDING_SEED_SCORE,
    ParseDirectionError, ProfileStore, RecordOutcome, Scorer, StoreError, SwipeEvent, SwipeLog,
    SwipeRecord, Tag, TagAffinityScorer, TagVocabulary, UserId, VOCABULARY_VERSION, affinity,
};

#[cfg(feature = "test-support")]
pub use stylesense_core::test_support;

pub use stylesense_feed::{
    DEFAULT_FEED_LIMIT, EngineError, FeedEngine, FeedRanker, FeedRequest,
    InvalidRankingThresholds, MAX_FEED_LIMIT, RankedFeed, RankingMode, RankingThresholds,
    ScoredItem, SwipeOutcome, SwipeRequest,
};
