//! Translation between geographic coordinates and the rendering surface.

use crate::error::{GeopinError, Result};
use crate::models::{GeoPoint, ProjectedPoint};

/// Port for converting between WGS 84 and surface coordinates.
///
/// Implementations must be consistent in both directions: unprojecting a
/// projected point returns the original within floating-point tolerance.
pub trait Projection {
    fn project(&self, point: GeoPoint) -> ProjectedPoint;

    fn unproject(&self, projected: ProjectedPoint) -> Result<GeoPoint>;
}

/// Spherical Web Mercator (EPSG:3857), the projection of OSM tile maps
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl WebMercator {
    pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

    /// Latitude at which the projected square world ends
    pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

    /// Half the width of the projected world in meters
    pub fn half_extent() -> f64 {
        std::f64::consts::PI * Self::EARTH_RADIUS_M
    }
}

impl Projection for WebMercator {
    /// Latitudes beyond ±[`WebMercator::MAX_LATITUDE`] are clamped.
    fn project(&self, point: GeoPoint) -> ProjectedPoint {
        let lat = point
            .latitude()
            .clamp(-Self::MAX_LATITUDE, Self::MAX_LATITUDE)
            .to_radians();
        let x = Self::EARTH_RADIUS_M * point.longitude().to_radians();
        let y = Self::EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
        ProjectedPoint::new(x, y)
    }

    fn unproject(&self, projected: ProjectedPoint) -> Result<GeoPoint> {
        if !projected.x.is_finite() || !projected.y.is_finite() {
            return Err(GeopinError::validation(
                "projected coordinate",
                format!("({}, {}) is not finite", projected.x, projected.y),
            ));
        }
        let lon = (projected.x / Self::EARTH_RADIUS_M).to_degrees();
        let lat = (2.0 * (projected.y / Self::EARTH_RADIUS_M).exp().atan()
            - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        GeoPoint::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let p = WebMercator.project(GeoPoint::new(0.0, 0.0).unwrap());
        assert!(p.x.abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_antimeridian_is_half_extent() {
        let p = WebMercator.project(GeoPoint::new(0.0, 180.0).unwrap());
        assert!((p.x - WebMercator::half_extent()).abs() < 1e-6);
    }

    #[test]
    fn test_pole_is_clamped() {
        let p = WebMercator.project(GeoPoint::new(90.0, 0.0).unwrap());
        assert!(p.y.is_finite());
        assert!((p.y - WebMercator::half_extent()).abs() < 1.0);
    }

    #[test]
    fn test_unproject_outside_world_fails() {
        let far = ProjectedPoint::new(WebMercator::half_extent() * 2.0, 0.0);
        assert!(WebMercator.unproject(far).is_err());
        assert!(WebMercator.unproject(ProjectedPoint::new(f64::NAN, 0.0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(lat in -85.0f64..85.0, lon in -180.0f64..180.0) {
            let original = GeoPoint::new(lat, lon).unwrap();
            let back = WebMercator.unproject(WebMercator.project(original)).unwrap();
            prop_assert!((back.latitude() - lat).abs() < 1e-9);
            prop_assert!((back.longitude() - lon).abs() < 1e-9);
        }
    }
}
