//! Ports for the two restaurant caches.
//!
//! The record cache holds copies of restaurants keyed by id. The search cache
//! holds ranked results keyed by query point. Neither is authoritative.

use async_trait::async_trait;

use crate::domain::{Restaurant, RestaurantId, SearchResult};

use super::{SearchCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum RestaurantCacheError {
        /// Cache backend is unavailable or rejected the operation.
        Backend { message: String } => "restaurant cache backend failure: {message}",
    }
}

/// A search result tagged with the write generation it was computed under.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSearch {
    pub generation: u64,
    pub result: SearchResult,
}

/// By-id cache of restaurant records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRecordCache: Send + Sync {
    async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantCacheError>;

    /// Store `restaurant`, replacing any entry under its id.
    async fn put(&self, restaurant: &Restaurant) -> Result<(), RestaurantCacheError>;

    /// Store `restaurant` only when its id has no entry yet.
    ///
    /// Returns the entry that is cached once the call completes, which is the
    /// existing one when another writer got there first.
    async fn insert_if_absent(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantCacheError>;

    async fn remove(&self, id: &RestaurantId) -> Result<(), RestaurantCacheError>;
}

/// By-query-point cache of ranked search results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchResultCache: Send + Sync {
    async fn get(&self, key: &SearchCacheKey) -> Result<Option<CachedSearch>, RestaurantCacheError>;

    async fn put(&self, key: &SearchCacheKey, entry: CachedSearch)
    -> Result<(), RestaurantCacheError>;

    /// Drop every entry.
    async fn invalidate_all(&self) -> Result<(), RestaurantCacheError>;
}

/// Cache that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantCache;

#[async_trait]
impl RestaurantRecordCache for FixtureRestaurantCache {
    async fn get(&self, _id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantCacheError> {
        Ok(None)
    }

    async fn put(&self, _restaurant: &Restaurant) -> Result<(), RestaurantCacheError> {
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantCacheError> {
        Ok(restaurant.clone())
    }

    async fn remove(&self, _id: &RestaurantId) -> Result<(), RestaurantCacheError> {
        Ok(())
    }
}

#[async_trait]
impl SearchResultCache for FixtureRestaurantCache {
    async fn get(
        &self,
        _key: &SearchCacheKey,
    ) -> Result<Option<CachedSearch>, RestaurantCacheError> {
        Ok(None)
    }

    async fn put(
        &self,
        _key: &SearchCacheKey,
        _entry: CachedSearch,
    ) -> Result<(), RestaurantCacheError> {
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), RestaurantCacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::Coordinates;
    use crate::domain::restaurant::fixtures::restaurant;

    #[rstest]
    #[tokio::test]
    async fn fixture_record_cache_always_misses() {
        let cache = FixtureRestaurantCache;
        let entry = restaurant("Kept", 0, 0, 1);
        RestaurantRecordCache::put(&cache, &entry)
            .await
            .expect("fixture put succeeds");
        let found = RestaurantRecordCache::get(&cache, entry.id())
            .await
            .expect("fixture get succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_search_cache_always_misses() {
        let cache = FixtureRestaurantCache;
        let key = SearchCacheKey::for_origin(&Coordinates::new(1, 1));
        let found = SearchResultCache::get(&cache, &key)
            .await
            .expect("fixture get succeeds");
        assert!(found.is_none());
    }
}
