//! Restaurant domain service.
//!
//! Implements both driving ports on top of the store port and the cache
//! layer. Input is validated before any I/O, so a rejected request never
//! touches the store or a cache.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::cache_layer::RestaurantCacheLayer;
use crate::domain::ports::{
    GetRestaurantRequest, LocateRestaurantsRequest, RestaurantCommand, RestaurantPayload,
    RestaurantQuery, RestaurantRecordCache, RestaurantRepository, RestaurantRepositoryError,
    SearchCacheKey, SearchResultCache, UpsertRestaurantRequest,
};
use crate::domain::{
    Coordinates, CoordinatesParseError, Error, ProximitySearch, Restaurant, RestaurantDraft,
    RestaurantId, RestaurantValidationError, SearchResult,
};

/// Wire format hint included in coordinate errors.
const COORDINATES_FORMAT_MESSAGE: &str = "Coordinates must be in format x=3,y=2";

fn map_repository_error(error: RestaurantRepositoryError) -> Error {
    let message = match error {
        RestaurantRepositoryError::Connection { message }
        | RestaurantRepositoryError::Query { message } => message,
    };
    Error::store_unavailable(format!("restaurant store unavailable: {message}"))
}

fn invalid_field(err: &RestaurantValidationError, value: Option<&str>) -> Error {
    let mut details = json!({ "field": err.field(), "code": "invalid_field" });
    if let Some(value) = value {
        details["value"] = json!(value);
    }
    Error::invalid_request(err.to_string()).with_details(details)
}

fn parse_id(raw: &str) -> Result<RestaurantId, Error> {
    RestaurantId::parse(raw).map_err(|err| invalid_field(&err, Some(raw)))
}

fn parse_coordinates(raw: Option<&str>) -> Result<Coordinates, Error> {
    let Some(text) = raw.filter(|text| !text.trim().is_empty()) else {
        return Err(Error::invalid_request("coordinates must not be blank")
            .with_details(json!({ "field": "coordinates", "code": "missing_field" })));
    };
    Coordinates::parse(text).map_err(|err: CoordinatesParseError| {
        Error::malformed_coordinates(COORDINATES_FORMAT_MESSAGE).with_details(json!({
            "field": "coordinates",
            "value": err.input(),
            "code": "malformed_coordinates",
        }))
    })
}

fn restaurant_from_request(request: UpsertRestaurantRequest) -> Result<Restaurant, Error> {
    let id = parse_id(&request.id)?;
    let coordinates = parse_coordinates(request.coordinates.as_deref())?;
    Restaurant::new(RestaurantDraft {
        id,
        name: request.name,
        kind: request.kind,
        opening_hours: request.opening_hours,
        image: request.image,
        radius: request.radius,
        coordinates: Some(coordinates),
    })
    .map_err(|err| invalid_field(&err, None))
}

/// Restaurant service implementing [`RestaurantQuery`] and
/// [`RestaurantCommand`].
pub struct RestaurantService<R, RC, SC> {
    repository: Arc<R>,
    search: ProximitySearch<R>,
    cache: RestaurantCacheLayer<RC, SC>,
}

impl<R, RC, SC> Clone for RestaurantService<R, RC, SC> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            search: self.search.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<R, RC, SC> RestaurantService<R, RC, SC>
where
    R: RestaurantRepository,
    RC: RestaurantRecordCache,
    SC: SearchResultCache,
{
    pub fn new(repository: Arc<R>, records: Arc<RC>, searches: Arc<SC>) -> Self {
        Self {
            search: ProximitySearch::new(Arc::clone(&repository)),
            repository,
            cache: RestaurantCacheLayer::new(records, searches),
        }
    }
}

#[async_trait]
impl<R, RC, SC> RestaurantQuery for RestaurantService<R, RC, SC>
where
    R: RestaurantRepository,
    RC: RestaurantRecordCache,
    SC: SearchResultCache,
{
    async fn locate(&self, request: LocateRestaurantsRequest) -> Result<SearchResult, Error> {
        let origin = request.origin();
        let key = SearchCacheKey::for_origin(&origin);
        self.cache
            .search_or_compute(&key, || self.search.search(&origin))
            .await
            .map_err(map_repository_error)
    }

    async fn get_restaurant(
        &self,
        request: GetRestaurantRequest,
    ) -> Result<RestaurantPayload, Error> {
        let id = parse_id(&request.id)?;
        info!(%id, "fetching restaurant");
        let restaurant = self
            .cache
            .restaurant_or_load(&id, || self.repository.find_by_id(&id))
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("Restaurant with ID {id} not found")))?;
        Ok(RestaurantPayload::from(&restaurant))
    }
}

#[async_trait]
impl<R, RC, SC> RestaurantCommand for RestaurantService<R, RC, SC>
where
    R: RestaurantRepository,
    RC: RestaurantRecordCache,
    SC: SearchResultCache,
{
    async fn upsert_restaurant(
        &self,
        request: UpsertRestaurantRequest,
    ) -> Result<RestaurantPayload, Error> {
        let restaurant = restaurant_from_request(request)?;
        let id = *restaurant.id();
        info!(%id, "storing restaurant");

        let _write = self.cache.lock_writes(&id).await;
        let stored = self
            .repository
            .put(&restaurant)
            .await
            .map_err(map_repository_error)?;
        let refreshed = self.cache.record_write(&stored).await;
        self.cache.invalidate_searches().await;
        if let Err(err) = refreshed {
            error!(%id, error = %err, "record cache left incoherent after write");
            return Err(Error::internal(format!(
                "restaurant {id} stored but its cache entry could not be refreshed"
            )));
        }

        info!(%id, "restaurant stored");
        Ok(RestaurantPayload::from(&stored))
    }
}

#[cfg(test)]
#[path = "restaurant_service_tests.rs"]
mod tests;
