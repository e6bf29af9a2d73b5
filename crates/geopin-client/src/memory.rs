//! In-memory place service for offline sessions and tests.
//!
//! Distances are haversine great-circle distances in meters.

use async_trait::async_trait;
use geo::{Distance as _, Haversine};
use geopin_core::error::{GeopinError, Result};
use geopin_core::models::{
    Distance, GeoPoint, NearbyPlace, NearbyResult, NearestPlace, NewPlace, Place, PlaceId,
};
use geopin_core::ports::GeoQueryService;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    places: Vec<Place>,
    created_by_key: HashMap<Uuid, Place>,
    next_id: u64,
}

/// In-memory implementation of GeoQueryService
#[derive(Debug, Default)]
pub struct MemoryGeoService {
    state: RwLock<MemoryState>,
}

impl MemoryGeoService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a place directly, bypassing validation. Returns its id.
    pub fn seed(&self, name: &str, place_type: &str, location: GeoPoint) -> PlaceId {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = next_id(&mut state);
        state.places.push(Place {
            id: Some(id.clone()),
            name: name.to_string(),
            place_type: place_type.to_string(),
            location,
        });
        id
    }

    /// Snapshot of all stored places
    pub fn places(&self) -> Vec<Place> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).places.clone()
    }

    fn distances_from(&self, origin: GeoPoint) -> Vec<(Place, f64)> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .places
            .iter()
            .map(|place| (place.clone(), haversine_m(origin, place.location)))
            .collect()
    }
}

fn next_id(state: &mut MemoryState) -> PlaceId {
    state.next_id += 1;
    PlaceId::new(state.next_id.to_string())
}

fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    Haversine.distance(geo::Point::from(a), geo::Point::from(b))
}

#[async_trait]
impl GeoQueryService for MemoryGeoService {
    async fn create_place(&self, place: &NewPlace) -> Result<Place> {
        if place.name.trim().is_empty() {
            return Err(GeopinError::validation("name", "place name is required"));
        }
        if place.place_type.trim().is_empty() {
            return Err(GeopinError::validation("type", "place type is required"));
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = state.created_by_key.get(&place.idempotency_key) {
            tracing::debug!("Replayed creation key {}", place.idempotency_key);
            return Ok(existing.clone());
        }

        let created = Place {
            id: Some(next_id(&mut state)),
            name: place.name.clone(),
            place_type: place.place_type.clone(),
            location: place.location,
        };
        state.places.push(created.clone());
        state.created_by_key.insert(place.idempotency_key, created.clone());
        Ok(created)
    }

    async fn find_nearby(&self, origin: GeoPoint, radius: Distance) -> Result<NearbyResult> {
        let limit = radius.to_meters();
        let mut nearby: NearbyResult = self
            .distances_from(origin)
            .into_iter()
            .filter(|(_, d)| *d <= limit)
            .map(|(place, distance_m)| NearbyPlace { place, distance_m })
            .collect();
        nearby.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        Ok(nearby)
    }

    async fn find_nearest(&self, origin: GeoPoint) -> Result<NearestPlace> {
        self.distances_from(origin)
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(place, distance_m)| NearestPlace { place, distance_m })
            .ok_or_else(|| GeopinError::NotFound(format!("no place near {}", origin)))
    }

    async fn compute_distance(&self, a: GeoPoint, b: GeoPoint) -> Result<f64> {
        Ok(haversine_m(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[tokio::test]
    async fn test_nearby_sorted_and_filtered() {
        let service = MemoryGeoService::new();
        service.seed("Far", "park", pt(20.40, 85.82));
        service.seed("Close", "food", pt(20.301, 85.82));
        service.seed("Middle", "shop", pt(20.32, 85.82));

        let result = service.find_nearby(pt(20.30, 85.82), Distance::kilometers(5.0)).await.unwrap();
        let names: Vec<_> = result.iter().map(|p| p.place.name.as_str()).collect();
        assert_eq!(names, vec!["Close", "Middle"]);
        assert!(result[0].distance_m <= result[1].distance_m);
    }

    #[tokio::test]
    async fn test_nearby_empty_is_success() {
        let service = MemoryGeoService::new();
        let result = service.find_nearby(pt(0.0, 0.0), Distance::kilometers(1.0)).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_nearest_not_found_when_empty() {
        let service = MemoryGeoService::new();
        assert!(matches!(
            service.find_nearest(pt(0.0, 0.0)).await,
            Err(GeopinError::NotFound(_))
        ));

        service.seed("Only", "food", pt(1.0, 1.0));
        let nearest = service.find_nearest(pt(0.0, 0.0)).await.unwrap();
        assert_eq!(nearest.place.name, "Only");
    }

    #[tokio::test]
    async fn test_distance_is_symmetric() {
        let service = MemoryGeoService::new();
        let a = pt(20.30, 85.82);
        let b = pt(20.35, 85.90);
        let ab = service.compute_distance(a, b).await.unwrap();
        let ba = service.compute_distance(b, a).await.unwrap();
        assert!((ab - ba).abs() < 1e-6);
        assert!(ab > 9_000.0 && ab < 11_000.0);
    }

    #[tokio::test]
    async fn test_creation_key_is_replayed() {
        let service = MemoryGeoService::new();
        let request = NewPlace::new("Cafe", "food", pt(20.30, 85.82), Uuid::new_v4()).unwrap();

        let first = service.create_place(&request).await.unwrap();
        let second = service.create_place(&request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(service.places().len(), 1);
    }
}
