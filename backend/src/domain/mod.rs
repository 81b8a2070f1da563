//! Domain primitives, ports and services.
//!
//! Purpose: model restaurants and proximity search independently of HTTP and
//! storage. Adapters talk to this layer through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Coordinates, Restaurant, RestaurantId: value types and the entity.
//! - rank_nearby / ProximitySearch: the search itself.
//! - RestaurantCacheLayer: cache policy in front of the store.
//! - RestaurantService: implementation of the driving ports.

pub mod cache_layer;
pub mod coordinates;
pub mod error;
pub mod ports;
pub mod proximity;
pub mod restaurant;
pub mod restaurant_service;
pub mod trace_id;

pub use self::cache_layer::RestaurantCacheLayer;
pub use self::coordinates::{ABSENT_COORDINATES, Coordinates, CoordinatesParseError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::proximity::{LocationView, ProximitySearch, SearchResult, rank_nearby};
pub use self::restaurant::{
    Restaurant, RestaurantDraft, RestaurantId, RestaurantValidationError,
};
pub use self::restaurant_service::RestaurantService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
