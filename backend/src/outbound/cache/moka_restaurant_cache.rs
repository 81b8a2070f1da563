//! In-process cache adapters built on `moka`.
//!
//! `moka::future::Cache` gives lock-free reads and atomic per-key replacement,
//! which is all the cache ports ask for. Capacity is an entry count; without
//! one the caches are unbounded.

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::ports::{
    CachedSearch, RestaurantCacheError, RestaurantRecordCache, SearchCacheKey, SearchResultCache,
};
use crate::domain::{Restaurant, RestaurantId};

fn build<K, V>(max_entries: Option<u64>) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let builder = MokaCache::builder();
    match max_entries {
        Some(limit) => builder.max_capacity(limit).build(),
        None => builder.build(),
    }
}

/// By-id restaurant cache.
#[derive(Clone)]
pub struct MokaRestaurantCache {
    cache: MokaCache<RestaurantId, Restaurant>,
}

impl MokaRestaurantCache {
    pub fn new(max_entries: Option<u64>) -> Self {
        Self {
            cache: build(max_entries),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flush pending evictions so counts are exact.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl RestaurantRecordCache for MokaRestaurantCache {
    async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantCacheError> {
        Ok(self.cache.get(id).await)
    }

    async fn put(&self, restaurant: &Restaurant) -> Result<(), RestaurantCacheError> {
        self.cache
            .insert(*restaurant.id(), restaurant.clone())
            .await;
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantCacheError> {
        let entry = self
            .cache
            .entry(*restaurant.id())
            .or_insert(restaurant.clone())
            .await;
        Ok(entry.into_value())
    }

    async fn remove(&self, id: &RestaurantId) -> Result<(), RestaurantCacheError> {
        self.cache.invalidate(id).await;
        Ok(())
    }
}

/// By-query-point search cache.
#[derive(Clone)]
pub struct MokaSearchCache {
    cache: MokaCache<SearchCacheKey, CachedSearch>,
}

impl MokaSearchCache {
    pub fn new(max_entries: Option<u64>) -> Self {
        Self {
            cache: build(max_entries),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flush pending evictions so counts are exact.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl SearchResultCache for MokaSearchCache {
    async fn get(&self, key: &SearchCacheKey) -> Result<Option<CachedSearch>, RestaurantCacheError> {
        Ok(self.cache.get(key).await)
    }

    async fn put(
        &self,
        key: &SearchCacheKey,
        entry: CachedSearch,
    ) -> Result<(), RestaurantCacheError> {
        self.cache.insert(key.clone(), entry).await;
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), RestaurantCacheError> {
        self.cache.invalidate_all();
        Ok(())
    }
}
