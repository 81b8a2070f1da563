//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their shape and are registered under the domain
//! type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is missing a field, has a blank field or an invalid id.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Coordinate text does not match `x=<int>,y=<int>`.
    #[schema(rename = "malformed_coordinates")]
    MalformedCoordinates,
    /// No restaurant is stored under the requested id.
    #[schema(rename = "not_found")]
    NotFound,
    /// The restaurant store could not be reached or failed the query.
    #[schema(rename = "store_unavailable")]
    StoreUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "malformed_coordinates")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Coordinates must be in format x=3,y=2")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
