use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Distance, GeoPoint, NearbyResult, NearestPlace, NewPlace, Place};

/// Port for the remote place service
///
/// Every method is a single request/response round trip. Implementations
/// must not retry `create_place` on their own: it has a side effect on the
/// remote store.
#[async_trait]
pub trait GeoQueryService: Send + Sync {
    /// Register a new place
    ///
    /// # Errors
    /// `Validation` when the service rejects the input, `Network` on
    /// transport failure.
    async fn create_place(&self, place: &NewPlace) -> Result<Place>;

    /// Places within `radius` of `origin`, ordered by ascending distance.
    /// An empty result is a success.
    async fn find_nearby(&self, origin: GeoPoint, radius: Distance) -> Result<NearbyResult>;

    /// The closest place to `origin`
    ///
    /// # Errors
    /// `NotFound` when the service has no place at all.
    async fn find_nearest(&self, origin: GeoPoint) -> Result<NearestPlace>;

    /// Distance in meters between two points
    async fn compute_distance(&self, a: GeoPoint, b: GeoPoint) -> Result<f64>;
}
