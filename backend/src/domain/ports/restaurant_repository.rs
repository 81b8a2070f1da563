//! Port for the authoritative restaurant store.

use async_trait::async_trait;

use crate::domain::{Restaurant, RestaurantId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by restaurant store adapters.
    pub enum RestaurantRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "restaurant repository connection failed: {message}",
        /// A read or write failed while executing, or returned undecodable data.
        Query { message: String } =>
            "restaurant repository query failed: {message}",
    }
}

/// Store of record for restaurants, keyed by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Every stored restaurant, in a stable order.
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantRepositoryError>;

    /// Find a restaurant by id.
    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantRepositoryError>;

    /// Create or wholesale replace the restaurant under its id, returning the
    /// stored value.
    async fn put(&self, restaurant: &Restaurant) -> Result<Restaurant, RestaurantRepositoryError>;
}

/// Fixture store that holds nothing and echoes writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantRepository;

#[async_trait]
impl RestaurantRepository for FixtureRestaurantRepository {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantRepositoryError> {
        Ok(None)
    }

    async fn put(&self, restaurant: &Restaurant) -> Result<Restaurant, RestaurantRepositoryError> {
        Ok(restaurant.clone())
    }
}
