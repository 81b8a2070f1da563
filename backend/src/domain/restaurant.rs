//! Restaurant entity and identifier.
//!
//! A restaurant is always created or replaced wholesale, so the entity has no
//! setters. [`RestaurantDraft`] carries unvalidated input; [`Restaurant::new`]
//! is the only way to turn it into an entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Coordinates;

/// Validation errors raised while building restaurant values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestaurantValidationError {
    #[error("restaurant id must not be empty")]
    EmptyId,
    #[error("Invalid UUID format: {0}")]
    InvalidId(String),
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("radius must be at least 1, got {0}")]
    RadiusTooSmall(i64),
    #[error("radius {0} is too large")]
    RadiusTooLarge(i64),
}

impl RestaurantValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId(_) => "id",
            Self::BlankField { field } => field,
            Self::RadiusTooSmall(_) | Self::RadiusTooLarge(_) => "radius",
        }
    }
}

/// Store key of a restaurant.
///
/// Equality and hashing follow the parsed UUID, so every spelling of one UUID
/// names the same restaurant. Renders as the lowercase hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantId(Uuid);

impl RestaurantId {
    /// Validate `id` as a UUID.
    ///
    /// # Examples
    /// ```
    /// use restaurant_search::domain::RestaurantId;
    ///
    /// assert!(RestaurantId::parse("not-a-uuid").is_err());
    /// let id = RestaurantId::parse("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("uuid");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// ```
    pub fn parse(id: impl AsRef<str>) -> Result<Self, RestaurantValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(RestaurantValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(RestaurantValidationError::InvalidId(id.to_owned()));
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| RestaurantValidationError::InvalidId(id.to_owned()))
    }

    /// Fresh v4 identifier.
    #[cfg(test)]
    pub(crate) fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl From<RestaurantId> for String {
    fn from(value: RestaurantId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for RestaurantId {
    type Error = RestaurantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Unvalidated restaurant input.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    pub id: RestaurantId,
    pub name: String,
    /// Cuisine or venue type, `type` on the wire.
    pub kind: String,
    pub opening_hours: String,
    pub image: String,
    pub radius: i64,
    pub coordinates: Option<Coordinates>,
}

/// A restaurant as held by the store.
///
/// ## Invariants
/// - text fields are non-blank;
/// - `radius >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    id: RestaurantId,
    name: String,
    kind: String,
    opening_hours: String,
    image: String,
    radius: u32,
    coordinates: Option<Coordinates>,
}

fn non_blank(value: String, field: &'static str) -> Result<String, RestaurantValidationError> {
    if value.trim().is_empty() {
        Err(RestaurantValidationError::BlankField { field })
    } else {
        Ok(value)
    }
}

impl Restaurant {
    /// Validate a draft into an entity.
    pub fn new(draft: RestaurantDraft) -> Result<Self, RestaurantValidationError> {
        let RestaurantDraft {
            id,
            name,
            kind,
            opening_hours,
            image,
            radius,
            coordinates,
        } = draft;

        if radius < 1 {
            return Err(RestaurantValidationError::RadiusTooSmall(radius));
        }
        let radius =
            u32::try_from(radius).map_err(|_| RestaurantValidationError::RadiusTooLarge(radius))?;

        Ok(Self {
            id,
            name: non_blank(name, "name")?,
            kind: non_blank(kind, "type")?,
            opening_hours: non_blank(opening_hours, "openingHours")?,
            image: non_blank(image, "image")?,
            radius,
            coordinates,
        })
    }

    /// Copy of this restaurant stored under `id`.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_id(&self, id: RestaurantId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    pub fn id(&self) -> &RestaurantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn opening_hours(&self) -> &str {
        &self.opening_hours
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn coordinates(&self) -> Option<&Coordinates> {
        self.coordinates.as_ref()
    }

    /// Build an entity with an arbitrary radius, including zero.
    #[cfg(test)]
    pub(crate) fn with_radius_unchecked(&self, radius: u32) -> Self {
        Self {
            radius,
            ..self.clone()
        }
    }
}
