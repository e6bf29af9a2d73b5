//! Wire shapes of the place service.

use geopin_core::error::{GeopinError, Result};
use geopin_core::models::{GeoPoint, NearbyPlace, NearestPlace, NewPlace, Place, PlaceId};
use serde::{Deserialize, Serialize};

/// Body of `POST /places`
#[derive(Debug, Serialize)]
pub struct CreatePlaceRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub place_type: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> From<&'a NewPlace> for CreatePlaceRequest<'a> {
    fn from(place: &'a NewPlace) -> Self {
        Self {
            name: &place.name,
            place_type: &place.place_type,
            latitude: place.location.latitude(),
            longitude: place.location.longitude(),
        }
    }
}

/// Response of `POST /places`. Only `id` is required; the remaining fields
/// fall back to what was sent.
#[derive(Debug, Deserialize)]
pub struct CreatePlaceResponse {
    pub id: Option<PlaceId>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CreatePlaceResponse {
    pub fn into_place(self, sent: &NewPlace) -> Result<Place> {
        let id = self.id.ok_or_else(|| GeopinError::UnexpectedResponse {
            status: 201,
            reason: "created place has no id".to_string(),
        })?;

        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => point_from_wire(lat, lon)?,
            _ => sent.location,
        };

        Ok(Place {
            id: Some(id),
            name: self.name.unwrap_or_else(|| sent.name.clone()),
            place_type: self.place_type.unwrap_or_else(|| sent.place_type.clone()),
            location,
        })
    }
}

/// One entry of the `GET /places/nearby` and `GET /places/nearest` responses
#[derive(Debug, Deserialize)]
pub struct PlaceWithDistance {
    pub id: Option<PlaceId>,
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

impl PlaceWithDistance {
    fn split(self) -> Result<(Place, f64)> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(GeopinError::UnexpectedResponse {
                status: 200,
                reason: format!("invalid distance {} for place '{}'", self.distance, self.name),
            });
        }
        let location = point_from_wire(self.latitude, self.longitude)?;
        Ok((
            Place {
                id: self.id,
                name: self.name,
                place_type: self.place_type,
                location,
            },
            self.distance,
        ))
    }

    pub fn into_nearby(self) -> Result<NearbyPlace> {
        let (place, distance_m) = self.split()?;
        Ok(NearbyPlace { place, distance_m })
    }

    pub fn into_nearest(self) -> Result<NearestPlace> {
        let (place, distance_m) = self.split()?;
        Ok(NearestPlace { place, distance_m })
    }
}

/// Response of `GET /places/distance`
#[derive(Debug, Deserialize)]
pub struct DistanceResponse {
    pub distance: Option<f64>,
}

impl DistanceResponse {
    /// A missing, zero, or non-finite distance counts as a failed answer.
    pub fn into_meters(self) -> Result<f64> {
        match self.distance {
            Some(d) if d.is_finite() && d > 0.0 => Ok(d),
            other => Err(GeopinError::UnexpectedResponse {
                status: 200,
                reason: format!("distance missing or empty: {:?}", other),
            }),
        }
    }
}

fn point_from_wire(latitude: f64, longitude: f64) -> Result<GeoPoint> {
    GeoPoint::new(latitude, longitude).map_err(|e| GeopinError::UnexpectedResponse {
        status: 200,
        reason: format!("service returned an invalid coordinate: {}", e),
    })
}
