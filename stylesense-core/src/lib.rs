//! Core domain types for the StyleSense taste engine.
//!
//! The crate models a user's learned taste as an [`AffinityProfile`]: a
//! bounded score per taxonomy [`Tag`], updated from binary like/skip
//! feedback and consulted when ranking catalogue items. Everything here is
//! pure and synchronous; durable storage and transport belong to the
//! collaborator traits in [`store`] and to the crates that implement them.
//!
//! Modules are leaf-first: [`tag`] and [`vocabulary`] define the taxonomy,
//! [`profile`] the per-user state, [`affinity`] the swipe update rule,
//! [`scorer`] per-item relevance, and [`store`] the persistence seams the
//! orchestration layer depends on.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod affinity;
pub mod item;
pub mod profile;
pub mod scorer;
pub mod store;
pub mod swipe;
pub mod tag;
pub mod vocabulary;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use affinity::{InvalidLearningConstants, LearningConstants};
pub use item::{Item, ItemId, ItemMetadata};
pub use profile::{AffinityProfile, NEUTRAL_SCORE, ONBOARDING_SEED_SCORE, UserId};
pub use scorer::{Scorer, TagAffinityScorer};
pub use store::{ItemCatalogue, ProfileStore, RecordOutcome, StoreError, SwipeLog};
pub use swipe::{Direction, ParseDirectionError, SwipeEvent, SwipeRecord};
pub use tag::{Dimension, InvalidTagError, Tag};
pub use vocabulary::{TagVocabulary, VOCABULARY_VERSION};
