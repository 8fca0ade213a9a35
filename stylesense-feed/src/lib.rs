//! Feed ranking and swipe orchestration for the StyleSense taste engine.
//!
//! The crate provides two complementary capabilities:
//! - **Batch ranking** via [`FeedRanker`]: scores every candidate against
//!   the user's [`AffinityProfile`](stylesense_core::AffinityProfile) and
//!   orders the batch, falling back to a uniform shuffle while behavioural
//!   evidence is too thin to trust (the cold-start policy).
//! - **Swipe orchestration** via [`FeedEngine`]: bridges one boundary call
//!   (a swipe submission, a feed request, a "Style DNA" summary) to the
//!   persistence collaborators declared in
//!   [`stylesense_core::store`], resolving duplicate-swipe and
//!   missing-item edge cases without surfacing them as failures.
//!
//! # Examples
//!
//! ```
//! use std::time::SystemTime;
//! use stylesense_core::test_support::{MemoryCatalogue, MemoryProfileStore, MemorySwipeLog};
//! use stylesense_core::{Item, ItemId, Tag, UserId};
//! use stylesense_feed::{FeedEngine, SwipeOutcome, SwipeRequest};
//!
//! let catalogue = MemoryCatalogue::with_items([Item::tagged(
//!     ItemId::new("i-1"),
//!     vec![Tag::new("streetwear")?],
//! )]);
//! let engine = FeedEngine::new(MemoryProfileStore::new(), MemorySwipeLog::new(), catalogue);
//!
//! let alice = UserId::new("alice");
//! let request = SwipeRequest::new(
//!     alice.clone(),
//!     ItemId::new("i-1"),
//!     "like",
//!     SystemTime::now(),
//! );
//! assert_eq!(engine.submit_swipe(&alice, request)?, SwipeOutcome::Applied);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;
mod ranker;

pub use engine::{
    DEFAULT_FEED_LIMIT, FeedEngine, FeedRequest, MAX_FEED_LIMIT, SwipeOutcome, SwipeRequest,
};
pub use error::EngineError;
pub use ranker::{
    FeedRanker, InvalidRankingThresholds, RankedFeed, RankingMode, RankingThresholds, ScoredItem,
};
