//! Geographic and projected coordinates.

use crate::error::{GeopinError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS 84 coordinate. Latitude is within [-90, 90] and longitude within
/// [-180, 180]; the fields are private so a constructed value always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range or non-finite coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeopinError::validation(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeopinError::validation(
                "longitude",
                format!("{} is outside [-180, 180]", longitude),
            ));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// geo uses x = longitude, y = latitude
impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl TryFrom<geo::Point<f64>> for GeoPoint {
    type Error = GeopinError;

    fn try_from(point: geo::Point<f64>) -> Result<Self> {
        GeoPoint::new(point.y(), point.x())
    }
}

#[derive(Serialize, Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeopinError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

/// A position on the rendering surface, in projected map units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let p = GeoPoint::new(20.30, 85.82).unwrap();
        assert_eq!(p.latitude(), 20.30);
        assert_eq!(p.longitude(), 85.82);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(GeopinError::Validation { ref field, .. }) if field == "latitude"
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.5),
            Err(GeopinError::Validation { ref field, .. }) if field == "longitude"
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_geo_point_axis_order() {
        let p = GeoPoint::new(20.30, 85.82).unwrap();
        let g: geo::Point<f64> = p.into();
        assert_eq!(g.x(), 85.82);
        assert_eq!(g.y(), 20.30);
        assert_eq!(GeoPoint::try_from(g).unwrap(), p);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#).unwrap();
        assert_eq!(ok.longitude(), 2.5);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 100.0, "longitude": 2.5}"#);
        assert!(bad.is_err());
    }
}
