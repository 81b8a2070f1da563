//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`RestaurantRepository`, the two cache ports) are implemented
//! by outbound adapters. Driving ports (`RestaurantQuery`,
//! `RestaurantCommand`) are implemented by the domain service and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod restaurant_cache;
mod restaurant_command;
mod restaurant_query;
mod restaurant_repository;

pub use cache_key::SearchCacheKey;
#[cfg(test)]
pub use restaurant_cache::{MockRestaurantRecordCache, MockSearchResultCache};
pub use restaurant_cache::{
    CachedSearch, FixtureRestaurantCache, RestaurantCacheError, RestaurantRecordCache,
    SearchResultCache,
};
#[cfg(test)]
pub use restaurant_command::MockRestaurantCommand;
pub use restaurant_command::{
    FixtureRestaurantCommand, RestaurantCommand, UpsertRestaurantRequest,
};
#[cfg(test)]
pub use restaurant_query::MockRestaurantQuery;
pub use restaurant_query::{
    FixtureRestaurantQuery, GetRestaurantRequest, LocateRestaurantsRequest, RestaurantPayload,
    RestaurantQuery,
};
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{
    FixtureRestaurantRepository, RestaurantRepository, RestaurantRepositoryError,
};
