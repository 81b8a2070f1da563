//! Proximity search over the full restaurant set.
//!
//! The search is a linear scan. A restaurant is kept when the query point lies
//! within its radius, and the survivors are sorted nearest first. The sort is
//! stable, so ties keep store order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Coordinates;
use crate::domain::Restaurant;
use crate::domain::ports::{RestaurantRepository, RestaurantRepositoryError};

/// One restaurant in a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationView {
    pub id: String,
    pub name: String,
    pub coordinates: String,
    /// Distance from the query point. Only meaningful for that query.
    pub distance: f64,
}

/// Ranked restaurants around one query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub user_location: String,
    pub locations: Vec<LocationView>,
}

impl SearchResult {
    /// A result for `origin` with nothing in range.
    pub fn empty(origin: &Coordinates) -> Self {
        Self {
            user_location: origin.to_string(),
            locations: Vec::new(),
        }
    }
}

/// Filter `restaurants` to those whose radius covers `origin` and order them
/// by ascending distance.
///
/// Restaurants without coordinates never match.
///
/// # Examples
/// ```
/// use restaurant_search::domain::{Coordinates, rank_nearby};
///
/// let result = rank_nearby(&[], &Coordinates::new(3, 2));
/// assert_eq!(result.user_location, "x=3,y=2");
/// assert!(result.locations.is_empty());
/// ```
pub fn rank_nearby(restaurants: &[Restaurant], origin: &Coordinates) -> SearchResult {
    let mut locations: Vec<LocationView> = restaurants
        .iter()
        .filter_map(|restaurant| {
            let distance = Coordinates::distance_between(restaurant.coordinates(), origin);
            (distance <= f64::from(restaurant.radius())).then(|| LocationView {
                id: restaurant.id().to_string(),
                name: restaurant.name().to_owned(),
                coordinates: Coordinates::format(restaurant.coordinates()),
                distance,
            })
        })
        .collect();
    locations.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    SearchResult {
        user_location: origin.to_string(),
        locations,
    }
}

/// Runs [`rank_nearby`] against the restaurant store.
pub struct ProximitySearch<R> {
    repository: Arc<R>,
}

impl<R> Clone for ProximitySearch<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> ProximitySearch<R>
where
    R: RestaurantRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Scan the store and rank everything around `origin`.
    pub async fn search(&self, origin: &Coordinates) -> Result<SearchResult, RestaurantRepositoryError> {
        let restaurants = self.repository.list_all().await?;
        let result = rank_nearby(&restaurants, origin);
        debug!(
            origin = %origin,
            scanned = restaurants.len(),
            matched = result.locations.len(),
            "ranked restaurants around query point"
        );
        Ok(result)
    }
}
