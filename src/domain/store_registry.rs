//! Concurrent store storage with per-store fine-grained locking.
//!
//! [`StoreRegistry`] keeps all stores in a `HashMap` where each entry is
//! individually protected by a [`tokio::sync::RwLock`]. This allows
//! concurrent reads on the same store and concurrent writes on different
//! stores; appointment writes to one store are serialized by its lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::store_entry::{StoreEntry, StoreSummary};
use super::store_id::StoreId;
use crate::error::BookingError;

/// Central registry of all known stores.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<StoreEntry>>` for fine-grained per-store locking.
///
/// # Concurrency
///
/// - Multiple tasks may read the same store concurrently.
/// - Writes to different stores are concurrent.
/// - Writes to the same store (bookings included) are serialized, which is
///   what makes the entry's appointment-map insert an atomic
///   check-then-write.
#[derive(Debug)]
pub struct StoreRegistry {
    stores: RwLock<HashMap<StoreId, Arc<RwLock<StoreEntry>>>>,
}

impl StoreRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new store entry into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] if a store with the same
    /// ID already exists (should never happen with UUID v4).
    pub async fn insert(&self, entry: StoreEntry) -> Result<StoreId, BookingError> {
        let store_id = entry.store_id;
        let mut map = self.stores.write().await;
        if map.contains_key(&store_id) {
            return Err(BookingError::InvalidRequest(format!(
                "store {store_id} already exists"
            )));
        }
        map.insert(store_id, Arc::new(RwLock::new(entry)));
        Ok(store_id)
    }

    /// Returns a shared reference to the store entry behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StoreNotFound`] if no store with the given
    /// ID exists.
    pub async fn get(&self, store_id: StoreId) -> Result<Arc<RwLock<StoreEntry>>, BookingError> {
        let map = self.stores.read().await;
        map.get(&store_id)
            .cloned()
            .ok_or(BookingError::StoreNotFound(*store_id.as_uuid()))
    }

    /// Returns summaries of all stores, sorted by creation time.
    pub async fn list(&self) -> Vec<StoreSummary> {
        let map = self.stores.read().await;
        let mut summaries = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            let entry = entry_lock.read().await;
            summaries.push(StoreSummary::from(&*entry));
        }
        summaries.sort_by_key(|s| s.created_at);
        summaries
    }

    /// Returns the per-store locks for every registered store.
    ///
    /// Used by cross-store reads (franchise-wide appointment listings).
    pub async fn entries(&self) -> Vec<Arc<RwLock<StoreEntry>>> {
        let map = self.stores.read().await;
        map.values().cloned().collect()
    }

    /// Returns the number of stores in the registry.
    pub async fn len(&self) -> usize {
        self.stores.read().await.len()
    }

    /// Returns `true` if the registry contains no stores.
    pub async fn is_empty(&self) -> bool {
        self.stores.read().await.is_empty()
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_entry(name: &str) -> StoreEntry {
        StoreEntry::new(
            StoreId::new(),
            name.to_string(),
            "1 Main St".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = StoreRegistry::new();
        let entry = make_entry("Downtown Repair");
        let id = entry.store_id;

        let result = registry.insert(entry).await;
        assert!(result.is_ok());

        let fetched = registry.get(id).await;
        assert!(fetched.is_ok());
    }

    #[tokio::test]
    async fn get_nonexistent_returns_not_found() {
        let registry = StoreRegistry::new();
        let result = registry.get(StoreId::new()).await;
        assert!(matches!(result, Err(BookingError::StoreNotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_insert_rejected() {
        let registry = StoreRegistry::new();
        let entry = make_entry("Downtown Repair");
        let id = entry.store_id;
        let _ = registry.insert(entry).await;

        let duplicate = StoreEntry::new(id, "Copy".to_string(), "2 Main St".to_string(), None);
        assert!(registry.insert(duplicate).await.is_err());
    }

    #[tokio::test]
    async fn list_returns_all() {
        let registry = StoreRegistry::new();
        let _ = registry.insert(make_entry("A")).await;
        let _ = registry.insert(make_entry("B")).await;

        let list = registry.list().await;
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let registry = StoreRegistry::new();
        assert!(registry.is_empty().await);
        assert_eq!(registry.len().await, 0);

        let _ = registry.insert(make_entry("A")).await;
        assert!(!registry.is_empty().await);
        assert_eq!(registry.len().await, 1);
    }
}
