//! Places as returned by the place service.

use crate::error::{GeopinError, Result};
use crate::models::point::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque server-assigned place identifier.
///
/// The service may use numeric or string ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPlaceId")]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlaceId {
    Text(String),
    Integer(i64),
}

impl From<RawPlaceId> for PlaceId {
    fn from(raw: RawPlaceId) -> Self {
        match raw {
            RawPlaceId::Text(s) => PlaceId(s),
            RawPlaceId::Integer(n) => PlaceId(n.to_string()),
        }
    }
}

/// A named place. The client never mutates a place it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Absent only for responses that do not carry one (nearest search)
    pub id: Option<PlaceId>,
    pub name: String,
    pub place_type: String,
    pub location: GeoPoint,
}

/// A place paired with its distance from the query origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub place: Place,
    pub distance_m: f64,
}

/// Nearby search result, in the order the service returned it
pub type NearbyResult = Vec<NearbyPlace>;

/// The closest place to a query origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestPlace {
    pub place: Place,
    pub distance_m: f64,
}

/// A place creation request
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub name: String,
    pub place_type: String,
    pub location: GeoPoint,
    /// Sent with the request so a manual retry after an ambiguous failure
    /// can be recognised as the same creation
    pub idempotency_key: Uuid,
}

impl NewPlace {
    /// Build a creation request from raw form input. Name and type are trimmed
    /// and must be non-empty.
    pub fn new(
        name: &str,
        place_type: &str,
        location: GeoPoint,
        idempotency_key: Uuid,
    ) -> Result<Self> {
        let name = name.trim();
        let place_type = place_type.trim();
        if name.is_empty() {
            return Err(GeopinError::validation("name", "place name is required"));
        }
        if place_type.is_empty() {
            return Err(GeopinError::validation("type", "place type is required"));
        }
        Ok(Self {
            name: name.to_string(),
            place_type: place_type.to_string(),
            location,
            idempotency_key,
        })
    }
}
