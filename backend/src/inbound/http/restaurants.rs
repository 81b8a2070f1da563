//! Restaurant HTTP handlers.
//!
//! ```text
//! GET /api/v1/locations/search?x=3&y=2
//! GET /api/v1/locations/{id}
//! PUT /api/v1/locations/{id}
//! ```
//!
//! Handlers check presence and shape of the raw input, then hand off to the
//! driving ports. Domain rules (UUID ids, coordinate text, radius bounds) are
//! enforced behind the ports.

use actix_web::{HttpRequest, error::JsonPayloadError, get, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    GetRestaurantRequest, LocateRestaurantsRequest, RestaurantPayload, UpsertRestaurantRequest,
};
use crate::domain::{Error, LocationView, SearchResult};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_non_negative, require_text,
};

/// Query string for proximity searches.
///
/// Both values arrive as text so a missing or negative value is reported
/// as a validation error rather than an extractor failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Horizontal position of the caller.
    #[param(value_type = u32, minimum = 0, example = 3)]
    pub x: Option<String>,
    /// Vertical position of the caller.
    #[param(value_type = u32, minimum = 0, example = 2)]
    pub y: Option<String>,
}

/// One restaurant in a search response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    #[schema(example = "x=5,y=5")]
    pub coordinates: String,
    #[schema(example = 3.605551275463989)]
    pub distance: f64,
}

/// Search response: caller position and matches, nearest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseBody {
    #[schema(example = "x=3,y=2")]
    pub user_location: String,
    pub locations: Vec<LocationBody>,
}

/// Restaurant view returned by reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(example = "10:00AM-11:00PM")]
    pub opening_hours: String,
    pub image: String,
    #[schema(minimum = 1)]
    pub radius: u32,
    #[schema(example = "x=5,y=5")]
    pub coordinates: String,
}

/// Request payload for creating or replacing a restaurant.
///
/// The id is taken from the path; an `id` in the body is ignored.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRestaurantRequestBody {
    #[schema(value_type = String)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: Option<String>,
    #[serde(alias = "opening-hours")]
    #[schema(value_type = String, example = "10:00AM-11:00PM")]
    pub opening_hours: Option<String>,
    #[schema(value_type = String)]
    pub image: Option<String>,
    #[schema(value_type = i64, minimum = 1)]
    pub radius: Option<i64>,
    #[schema(value_type = String, example = "x=5,y=5")]
    pub coordinates: Option<String>,
}

impl From<LocationView> for LocationBody {
    fn from(value: LocationView) -> Self {
        Self {
            id: value.id,
            name: value.name,
            coordinates: value.coordinates,
            distance: value.distance,
        }
    }
}

impl From<SearchResult> for SearchResponseBody {
    fn from(value: SearchResult) -> Self {
        Self {
            user_location: value.user_location,
            locations: value.locations.into_iter().map(LocationBody::from).collect(),
        }
    }
}

impl From<RestaurantPayload> for RestaurantBody {
    fn from(value: RestaurantPayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: value.kind,
            opening_hours: value.opening_hours,
            image: value.image,
            radius: value.radius,
            coordinates: value.coordinates,
        }
    }
}

fn parse_search_query(query: SearchQuery) -> Result<LocateRestaurantsRequest, Error> {
    Ok(LocateRestaurantsRequest {
        x: parse_non_negative(query.x.as_deref(), FieldName::new("x"))?,
        y: parse_non_negative(query.y.as_deref(), FieldName::new("y"))?,
    })
}

fn parse_upsert_body(
    id: String,
    body: UpsertRestaurantRequestBody,
) -> Result<UpsertRestaurantRequest, Error> {
    Ok(UpsertRestaurantRequest {
        id,
        name: require_text(body.name, FieldName::new("name"))?,
        kind: require_text(body.kind, FieldName::new("type"))?,
        opening_hours: require_text(body.opening_hours, FieldName::new("openingHours"))?,
        image: require_text(body.image, FieldName::new("image"))?,
        radius: body
            .radius
            .ok_or_else(|| missing_field_error(FieldName::new("radius")))?,
        coordinates: body.coordinates,
    })
}

/// Map JSON extractor failures onto the domain error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}

/// Register the restaurant routes on a scope. The search route is added
/// before `{id}` so it is not captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(search_locations)
        .service(get_location)
        .service(upsert_location);
}

/// Restaurants whose radius covers the caller, nearest first.
#[utoipa::path(
    get,
    path = "/api/v1/locations/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching restaurants", body = SearchResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "searchLocations"
)]
#[get("/locations/search")]
pub async fn search_locations(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<SearchResponseBody>> {
    let request = parse_search_query(query.into_inner())?;
    let result = state.restaurants.locate(request).await?;
    Ok(web::Json(SearchResponseBody::from(result)))
}

/// Fetch one restaurant by id.
#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    params(("id" = String, Path, description = "Restaurant UUID")),
    responses(
        (status = 200, description = "Restaurant", body = RestaurantBody),
        (status = 400, description = "Id is not a UUID", body = ErrorSchema),
        (status = 404, description = "No restaurant with this id", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "getLocation"
)]
#[get("/locations/{id}")]
pub async fn get_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RestaurantBody>> {
    let request = GetRestaurantRequest {
        id: path.into_inner(),
    };
    let payload = state.restaurants.get_restaurant(request).await?;
    Ok(web::Json(RestaurantBody::from(payload)))
}

/// Create or replace the restaurant stored under `id`.
#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}",
    params(("id" = String, Path, description = "Restaurant UUID")),
    request_body = UpsertRestaurantRequestBody,
    responses(
        (status = 200, description = "Stored restaurant", body = RestaurantBody),
        (status = 400, description = "Invalid request or coordinates", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "upsertLocation"
)]
#[put("/locations/{id}")]
pub async fn upsert_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpsertRestaurantRequestBody>,
) -> ApiResult<web::Json<RestaurantBody>> {
    let request = parse_upsert_body(path.into_inner(), payload.into_inner())?;
    let stored = state.restaurants_command.upsert_restaurant(request).await?;
    Ok(web::Json(RestaurantBody::from(stored)))
}

#[cfg(test)]
#[path = "restaurants_tests.rs"]
mod tests;
