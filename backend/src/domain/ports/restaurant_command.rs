//! Driving port for restaurant writes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

use super::RestaurantPayload;

/// Create or replace the restaurant stored under `id`.
///
/// Every field is raw caller input. `id` comes from the request path and wins
/// over any id the caller put in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRestaurantRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub opening_hours: String,
    pub image: String,
    pub radius: i64,
    pub coordinates: Option<String>,
}

/// Driving port for restaurant write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantCommand: Send + Sync {
    /// Validate, store, refresh the by-id cache and drop cached searches.
    ///
    /// Validation happens before any I/O, so a rejected request leaves the
    /// store and both caches untouched.
    async fn upsert_restaurant(
        &self,
        request: UpsertRestaurantRequest,
    ) -> Result<RestaurantPayload, Error>;
}

/// Fixture command that echoes the request without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantCommand;

#[async_trait]
impl RestaurantCommand for FixtureRestaurantCommand {
    async fn upsert_restaurant(
        &self,
        request: UpsertRestaurantRequest,
    ) -> Result<RestaurantPayload, Error> {
        let radius = u32::try_from(request.radius)
            .map_err(|_| Error::invalid_request("radius must be at least 1"))?;
        Ok(RestaurantPayload {
            id: request.id,
            name: request.name,
            kind: request.kind,
            opening_hours: request.opening_hours,
            image: request.image,
            radius,
            coordinates: request.coordinates.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_echoes_request() {
        let request = UpsertRestaurantRequest {
            id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
            name: "Echo".to_owned(),
            kind: "Diner".to_owned(),
            opening_hours: "all day".to_owned(),
            image: "https://example.test/e.png".to_owned(),
            radius: 4,
            coordinates: Some("x=1,y=2".to_owned()),
        };

        let payload = FixtureRestaurantCommand
            .upsert_restaurant(request.clone())
            .await
            .expect("fixture upsert succeeds");

        assert_eq!(payload.id, request.id);
        assert_eq!(payload.radius, 4);
        assert_eq!(payload.coordinates, "x=1,y=2");
    }
}
