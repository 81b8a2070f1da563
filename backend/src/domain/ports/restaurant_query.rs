//! Driving port for restaurant reads.
//!
//! Inbound adapters call this port for proximity searches and single-record
//! lookups without knowing about the store or the caches behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, Error, Restaurant, SearchResult};

/// Search for restaurants whose radius covers `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateRestaurantsRequest {
    pub x: u32,
    pub y: u32,
}

impl LocateRestaurantsRequest {
    pub fn origin(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }
}

/// Fetch one restaurant. `id` is raw caller input and is validated by the
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRestaurantRequest {
    pub id: String,
}

/// Restaurant view returned by reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub opening_hours: String,
    pub image: String,
    pub radius: u32,
    pub coordinates: String,
}

impl From<&Restaurant> for RestaurantPayload {
    fn from(value: &Restaurant) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            kind: value.kind().to_owned(),
            opening_hours: value.opening_hours().to_owned(),
            image: value.image().to_owned(),
            radius: value.radius(),
            coordinates: Coordinates::format(value.coordinates()),
        }
    }
}

/// Driving port for restaurant read operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), restaurant_search::domain::Error> {
/// use restaurant_search::domain::ports::{
///     FixtureRestaurantQuery, LocateRestaurantsRequest, RestaurantQuery,
/// };
///
/// let query = FixtureRestaurantQuery;
/// let result = query.locate(LocateRestaurantsRequest { x: 3, y: 2 }).await?;
/// assert_eq!(result.user_location, "x=3,y=2");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantQuery: Send + Sync {
    /// Restaurants covering the query point, nearest first.
    async fn locate(&self, request: LocateRestaurantsRequest) -> Result<SearchResult, Error>;

    /// One restaurant by id.
    ///
    /// Fails with `invalid_request` when the id is not a UUID and `not_found`
    /// when nothing is stored under it.
    async fn get_restaurant(&self, request: GetRestaurantRequest)
    -> Result<RestaurantPayload, Error>;
}

/// Fixture query with an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantQuery;

#[async_trait]
impl RestaurantQuery for FixtureRestaurantQuery {
    async fn locate(&self, request: LocateRestaurantsRequest) -> Result<SearchResult, Error> {
        Ok(SearchResult::empty(&request.origin()))
    }

    async fn get_restaurant(
        &self,
        request: GetRestaurantRequest,
    ) -> Result<RestaurantPayload, Error> {
        Err(Error::not_found(format!(
            "Restaurant with ID {} not found",
            request.id
        )))
    }
}
