//! Row types and the stored JSON document shape.
//!
//! These are internal to the persistence adapter; the domain only ever sees
//! [`Restaurant`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Coordinates, Restaurant, RestaurantDraft, RestaurantId, RestaurantValidationError};

use super::schema::restaurants;

/// Row read back from `restaurants`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantRow {
    pub id: Uuid,
    pub document: serde_json::Value,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for upserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = restaurants)]
pub(crate) struct NewRestaurantRow {
    pub id: Uuid,
    pub document: serde_json::Value,
}

/// JSON document stored per restaurant.
///
/// Coordinates are stored as canonical text and may be absent in documents
/// written by other tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestaurantDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub opening_hours: String,
    pub image: String,
    pub radius: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl From<&Restaurant> for RestaurantDocument {
    fn from(value: &Restaurant) -> Self {
        Self {
            name: value.name().to_owned(),
            kind: value.kind().to_owned(),
            opening_hours: value.opening_hours().to_owned(),
            image: value.image().to_owned(),
            radius: i64::from(value.radius()),
            coordinates: value.coordinates().copied(),
        }
    }
}

impl RestaurantDocument {
    pub(crate) fn into_restaurant(
        self,
        id: Uuid,
    ) -> Result<Restaurant, RestaurantValidationError> {
        Restaurant::new(RestaurantDraft {
            id: RestaurantId::from_uuid(id),
            name: self.name,
            kind: self.kind,
            opening_hours: self.opening_hours,
            image: self.image,
            radius: self.radius,
            coordinates: self.coordinates,
        })
    }
}
