//! Cache policy in front of the restaurant store.
//!
//! Two caches with different rules:
//!
//! - **By id.** Read-through on a miss, write-through on every write. A
//!   read-through only fills an empty slot, so it cannot clobber a value a
//!   concurrent writer just stored.
//! - **By query point.** Read-through on a miss and dropped wholesale after
//!   any write. Each entry carries the write generation it was computed
//!   under, and only entries from the current generation are served. A search
//!   that raced a write may still land in the cache, but it is never returned.
//!
//! Writes to one id are serialised through [`RestaurantCacheLayer::lock_writes`]
//! so the store and the by-id entry see them in the same order.
//!
//! Cache failures never fail a read. They are logged and treated as misses.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, warn};

use crate::domain::ports::{
    CachedSearch, RestaurantCacheError, RestaurantRecordCache, SearchCacheKey, SearchResultCache,
};
use crate::domain::{Restaurant, RestaurantId, SearchResult};

const WRITE_LOCK_SHARDS: usize = 64;

/// Striped locks keyed by restaurant id.
struct WriteLocks(Box<[Mutex<()>]>);

impl WriteLocks {
    fn new() -> Self {
        Self((0..WRITE_LOCK_SHARDS).map(|_| Mutex::new(())).collect())
    }

    async fn lock(&self, id: &RestaurantId) -> MutexGuard<'_, ()> {
        let shard = (id.as_uuid().as_u128() % self.0.len() as u128) as usize;
        self.0[shard].lock().await
    }
}

/// Coordinates the record cache and the search cache.
pub struct RestaurantCacheLayer<RC, SC> {
    records: Arc<RC>,
    searches: Arc<SC>,
    generation: Arc<AtomicU64>,
    write_locks: Arc<WriteLocks>,
}

impl<RC, SC> Clone for RestaurantCacheLayer<RC, SC> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            searches: Arc::clone(&self.searches),
            generation: Arc::clone(&self.generation),
            write_locks: Arc::clone(&self.write_locks),
        }
    }
}

impl<RC, SC> RestaurantCacheLayer<RC, SC>
where
    RC: RestaurantRecordCache,
    SC: SearchResultCache,
{
    pub fn new(records: Arc<RC>, searches: Arc<SC>) -> Self {
        Self {
            records,
            searches,
            generation: Arc::new(AtomicU64::new(0)),
            write_locks: Arc::new(WriteLocks::new()),
        }
    }

    /// Hold while writing `id` to the store and then to the record cache.
    pub async fn lock_writes(&self, id: &RestaurantId) -> MutexGuard<'_, ()> {
        self.write_locks.lock(id).await
    }

    /// Number of write invalidations seen so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Cached restaurant for `id`, or the result of `load` on a miss.
    ///
    /// A loaded restaurant is cached unless another entry appeared meanwhile,
    /// in which case that entry is returned instead.
    pub async fn restaurant_or_load<F, Fut, E>(
        &self,
        id: &RestaurantId,
        load: F,
    ) -> Result<Option<Restaurant>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<Restaurant>, E>>,
    {
        match self.records.get(id).await {
            Ok(Some(hit)) => return Ok(Some(hit)),
            Ok(None) => {}
            Err(err) => warn!(%id, error = %err, "record cache read failed; loading from store"),
        }

        let Some(loaded) = load().await? else {
            return Ok(None);
        };
        match self.records.insert_if_absent(&loaded).await {
            Ok(cached) => Ok(Some(cached)),
            Err(err) => {
                warn!(%id, error = %err, "record cache fill failed");
                Ok(Some(loaded))
            }
        }
    }

    /// Refresh the by-id entry after a successful store write.
    ///
    /// When the refresh fails the entry is removed so the next read goes to
    /// the store. Only a failure of both is returned.
    pub async fn record_write(&self, restaurant: &Restaurant) -> Result<(), RestaurantCacheError> {
        let Err(put_err) = self.records.put(restaurant).await else {
            return Ok(());
        };
        let id = restaurant.id();
        error!(%id, error = %put_err, "record cache refresh failed; evicting entry");
        self.records.remove(id).await.map_err(|remove_err| {
            error!(%id, error = %remove_err, "record cache eviction failed");
            remove_err
        })
    }

    /// Cached search for `key`, or the result of `compute` on a miss.
    pub async fn search_or_compute<F, Fut, E>(
        &self,
        key: &SearchCacheKey,
        compute: F,
    ) -> Result<SearchResult, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SearchResult, E>>,
    {
        let generation = self.generation();
        match self.searches.get(key).await {
            Ok(Some(entry)) if entry.generation == generation => return Ok(entry.result),
            Ok(_) => {}
            Err(err) => warn!(%key, error = %err, "search cache read failed; recomputing"),
        }

        let result = compute().await?;
        if self.generation() == generation {
            let entry = CachedSearch {
                generation,
                result: result.clone(),
            };
            if let Err(err) = self.searches.put(key, entry).await {
                warn!(%key, error = %err, "search cache fill failed");
            }
        }
        Ok(result)
    }

    /// Retire every cached search.
    ///
    /// The generation moves first, so stale entries are unreachable even if
    /// clearing the backend fails.
    pub async fn invalidate_searches(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Err(err) = self.searches.invalidate_all().await {
            warn!(generation, error = %err, "search cache clear failed");
        }
    }
}

#[cfg(test)]
#[path = "cache_layer_tests.rs"]
mod tests;
