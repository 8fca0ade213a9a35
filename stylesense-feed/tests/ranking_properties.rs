//! Property-based tests for feed ranking.
//!
//! # Invariants tested
//!
//! - **Permutation:** ranking never drops, duplicates, or invents items.
//! - **Warm ordering:** when scores are trusted, the batch is sorted by
//!   score descending.
//! - **Determinism:** the same seed reproduces the same order.
//! - **Score validity:** every computed score is finite and within
//!   `0.0..=1.0`.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stylesense_core::{AffinityProfile, Item, ItemId, Tag};
use stylesense_feed::{FeedRanker, RankingMode};

const TAG_POOL: &[&str] = &["minimalist", "streetwear", "black", "linen", "floral"];

fn tag_strategy() -> impl Strategy<Value = Tag> {
    proptest::sample::select(TAG_POOL)
        .prop_map(|name| Tag::new(name).expect("pool tags are valid"))
}

fn item_strategy() -> impl Strategy<Value = Vec<Tag>> {
    proptest::collection::vec(tag_strategy(), 0..3)
}

/// Batch of items with unique, position-derived ids.
fn batch_strategy(max_len: usize) -> impl Strategy<Value = Vec<Item>> {
    proptest::collection::vec(item_strategy(), 0..max_len).prop_map(|tag_lists| {
        tag_lists
            .into_iter()
            .enumerate()
            .map(|(index, tags)| Item::tagged(ItemId::new(format!("i-{index}")), tags))
            .collect()
    })
}

fn profile_strategy() -> impl Strategy<Value = AffinityProfile> {
    proptest::collection::btree_map(tag_strategy(), 0.0_f32..=1.0_f32, 0..5)
        .prop_map(AffinityProfile::from_scores)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: ranking returns exactly the candidates it was given.
    #[test]
    fn rank_returns_a_permutation(
        batch in batch_strategy(12),
        profile in profile_strategy(),
        observed in 0_u64..20,
        seed in any::<u64>(),
    ) {
        let expected: BTreeSet<String> =
            batch.iter().map(|item| item.id.as_str().to_owned()).collect();
        let expected_len = batch.len();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let feed = FeedRanker::new().rank(batch, &profile, observed, &mut rng);

        prop_assert_eq!(feed.items.len(), expected_len);
        let served: BTreeSet<String> = feed
            .items
            .iter()
            .map(|entry| entry.item.id.as_str().to_owned())
            .collect();
        prop_assert_eq!(served, expected);
    }

    /// Property: the warm path is sorted by score descending.
    #[test]
    fn warm_rank_is_sorted_descending(
        batch in batch_strategy(12),
        profile in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let feed = FeedRanker::new().rank(batch, &profile, 50, &mut rng);
        if feed.mode == RankingMode::Ranked {
            for pair in feed.items.windows(2) {
                prop_assert!(
                    pair[0].score >= pair[1].score,
                    "scores out of order: {} before {}",
                    pair[0].score,
                    pair[1].score
                );
            }
        }
    }

    /// Property: identical input and seed reproduce the order exactly.
    #[test]
    fn rank_is_deterministic_given_a_seed(
        batch in batch_strategy(12),
        profile in profile_strategy(),
        observed in 0_u64..20,
        seed in any::<u64>(),
    ) {
        let ranker = FeedRanker::new();
        let mut first_rng = ChaCha8Rng::seed_from_u64(seed);
        let mut second_rng = ChaCha8Rng::seed_from_u64(seed);
        let first = ranker.rank(batch.clone(), &profile, observed, &mut first_rng);
        let second = ranker.rank(batch, &profile, observed, &mut second_rng);
        prop_assert_eq!(first, second);
    }

    /// Property: every computed score is finite and within the unit
    /// interval.
    #[test]
    fn scores_stay_valid(
        batch in batch_strategy(12),
        profile in profile_strategy(),
        observed in 0_u64..20,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let feed = FeedRanker::new().rank(batch, &profile, observed, &mut rng);
        for entry in &feed.items {
            prop_assert!(entry.score.is_finite());
            prop_assert!((0.0..=1.0).contains(&entry.score));
        }
    }
}
