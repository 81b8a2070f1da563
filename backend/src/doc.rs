//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the restaurant and health endpoints together with the
//! schema wrappers for domain types ([`ErrorSchema`], [`ErrorCodeSchema`]).
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::restaurants::{
    LocationBody, RestaurantBody, SearchResponseBody, UpsertRestaurantRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restaurant search API",
        description = "Proximity search and record access for restaurants."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::restaurants::search_locations,
        crate::inbound::http::restaurants::get_location,
        crate::inbound::http::restaurants::upsert_location,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SearchResponseBody,
        LocationBody,
        RestaurantBody,
        UpsertRestaurantRequestBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "locations", description = "Restaurant search and records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
