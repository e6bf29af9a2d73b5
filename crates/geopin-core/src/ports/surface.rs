use crate::models::{GeoPoint, MarkerHandle, PinStyle};

/// Port for the marker layer of the rendering surface
///
/// Adding is never rejected while the map is mounted.
pub trait MapSurface {
    /// Place a marker and return its identity
    fn add_marker(&mut self, at: GeoPoint, style: &PinStyle) -> MarkerHandle;

    /// Remove a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: MarkerHandle);
}
