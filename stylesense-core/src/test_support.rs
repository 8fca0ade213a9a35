//! Test-only, in-memory collaborator implementations used by unit and
//! behaviour tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::item::{Item, ItemId};
use crate::profile::{AffinityProfile, UserId};
use crate::store::{ItemCatalogue, ProfileStore, RecordOutcome, StoreError, SwipeLog};
use crate::swipe::{Direction, SwipeRecord};

/// In-memory [`ProfileStore`] holding one map per user.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<UserId, AffinityProfile>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one profile.
    pub fn with_profile(user: UserId, profile: AffinityProfile) -> Self {
        let store = Self::new();
        if let Ok(mut profiles) = store.profiles.lock() {
            profiles.insert(user, profile);
        }
        store
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, user: &UserId) -> Result<Option<AffinityProfile>, StoreError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|_| StoreError::unavailable("load profile"))?;
        Ok(profiles.get(user).cloned())
    }

    fn save(&self, user: &UserId, profile: &AffinityProfile) -> Result<(), StoreError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| StoreError::unavailable("save profile"))?;
        profiles.insert(user.clone(), profile.clone());
        Ok(())
    }
}

/// In-memory [`SwipeLog`] enforcing the `(user, item)` uniqueness
/// constraint with a linear scan; intended only for small datasets.
#[derive(Debug, Default)]
pub struct MemorySwipeLog {
    swipes: Mutex<Vec<(UserId, SwipeRecord)>>,
}

impl MemorySwipeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of swipes across all users.
    pub fn len(&self) -> usize {
        self.swipes.lock().map(|swipes| swipes.len()).unwrap_or(0)
    }

    /// Report whether the log holds no swipes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SwipeLog for MemorySwipeLog {
    fn record(&self, user: &UserId, swipe: &SwipeRecord) -> Result<RecordOutcome, StoreError> {
        let mut swipes = self
            .swipes
            .lock()
            .map_err(|_| StoreError::unavailable("record swipe"))?;
        let duplicate = swipes
            .iter()
            .any(|(u, s)| u == user && s.item_id == swipe.item_id);
        if duplicate {
            return Ok(RecordOutcome::Duplicate);
        }
        swipes.push((user.clone(), swipe.clone()));
        Ok(RecordOutcome::Recorded)
    }

    fn swipe_count(&self, user: &UserId) -> Result<u64, StoreError> {
        let swipes = self
            .swipes
            .lock()
            .map_err(|_| StoreError::unavailable("count swipes"))?;
        Ok(swipes.iter().filter(|(u, _)| u == user).count() as u64)
    }

    fn liked_item_ids(&self, user: &UserId, limit: usize) -> Result<Vec<ItemId>, StoreError> {
        let swipes = self
            .swipes
            .lock()
            .map_err(|_| StoreError::unavailable("list liked swipes"))?;
        Ok(swipes
            .iter()
            .rev()
            .filter(|(u, s)| u == user && s.direction == Direction::Like)
            .map(|(_, s)| s.item_id.clone())
            .take(limit)
            .collect())
    }
}

/// In-memory [`ItemCatalogue`] backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryCatalogue {
    items: Mutex<HashMap<ItemId, Item>>,
}

impl MemoryCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalogue from a collection of items.
    pub fn with_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        let catalogue = Self::new();
        if let Ok(mut map) = catalogue.items.lock() {
            for item in items {
                map.insert(item.id.clone(), item);
            }
        }
        catalogue
    }

    /// Remove an item, simulating catalogue deletion mid-session.
    pub fn remove(&self, id: &ItemId) {
        if let Ok(mut map) = self.items.lock() {
            map.remove(id);
        }
    }
}

impl ItemCatalogue for MemoryCatalogue {
    fn item(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let items = self
            .items
            .lock()
            .map_err(|_| StoreError::unavailable("fetch item"))?;
        Ok(items.get(id).cloned())
    }
}

/// Collaborator that fails every call, for exercising server-error paths.
#[derive(Debug, Default, Copy, Clone)]
pub struct UnavailableStore;

impl ProfileStore for UnavailableStore {
    fn load(&self, _user: &UserId) -> Result<Option<AffinityProfile>, StoreError> {
        Err(StoreError::unavailable("load profile"))
    }

    fn save(&self, _user: &UserId, _profile: &AffinityProfile) -> Result<(), StoreError> {
        Err(StoreError::unavailable("save profile"))
    }
}

impl SwipeLog for UnavailableStore {
    fn record(&self, _user: &UserId, _swipe: &SwipeRecord) -> Result<RecordOutcome, StoreError> {
        Err(StoreError::unavailable("record swipe"))
    }

    fn swipe_count(&self, _user: &UserId) -> Result<u64, StoreError> {
        Err(StoreError::unavailable("count swipes"))
    }

    fn liked_item_ids(&self, _user: &UserId, _limit: usize) -> Result<Vec<ItemId>, StoreError> {
        Err(StoreError::unavailable("list liked swipes"))
    }
}

impl ItemCatalogue for UnavailableStore {
    fn item(&self, _id: &ItemId) -> Result<Option<Item>, StoreError> {
        Err(StoreError::unavailable("fetch item"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn record(item: &str, direction: Direction) -> SwipeRecord {
        SwipeRecord::new(ItemId::new(item), direction, SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn swipe_log_rejects_duplicates_per_user_item_pair() {
        let log = MemorySwipeLog::new();
        let user = UserId::new("u-1");
        let first = log.record(&user, &record("i-1", Direction::Like)).unwrap();
        let second = log.record(&user, &record("i-1", Direction::Skip)).unwrap();
        assert_eq!(first, RecordOutcome::Recorded);
        assert_eq!(second, RecordOutcome::Duplicate);
        assert_eq!(log.swipe_count(&user).unwrap(), 1);
    }

    #[test]
    fn swipe_log_isolates_users() {
        let log = MemorySwipeLog::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        log.record(&alice, &record("i-1", Direction::Like)).unwrap();
        let outcome = log.record(&bob, &record("i-1", Direction::Like)).unwrap();
        assert_eq!(outcome, RecordOutcome::Recorded);
        assert_eq!(log.swipe_count(&alice).unwrap(), 1);
        assert_eq!(log.swipe_count(&bob).unwrap(), 1);
    }

    #[test]
    fn liked_ids_come_back_most_recent_first() {
        let log = MemorySwipeLog::new();
        let user = UserId::new("u-1");
        log.record(&user, &record("i-1", Direction::Like)).unwrap();
        log.record(&user, &record("i-2", Direction::Skip)).unwrap();
        log.record(&user, &record("i-3", Direction::Like)).unwrap();
        let liked = log.liked_item_ids(&user, 10).unwrap();
        assert_eq!(liked, vec![ItemId::new("i-3"), ItemId::new("i-1")]);
    }

    #[test]
    fn catalogue_returns_none_after_removal() {
        let catalogue = MemoryCatalogue::with_items([Item::untagged(ItemId::new("i-1"))]);
        let id = ItemId::new("i-1");
        assert!(catalogue.item(&id).unwrap().is_some());
        catalogue.remove(&id);
        assert!(catalogue.item(&id).unwrap().is_none());
    }
}
