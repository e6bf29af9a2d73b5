//! In-memory marker layer.

use geopin_core::models::{GeoPoint, MarkerHandle, PinStyle};
use geopin_core::ports::MapSurface;
use std::collections::BTreeMap;

/// A marker currently on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: GeoPoint,
    pub style: PinStyle,
}

/// In-memory implementation of MapSurface
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    markers: BTreeMap<MarkerHandle, Marker>,
    next_handle: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: MarkerHandle) -> Option<&Marker> {
        self.markers.get(&handle)
    }

    /// Markers in the order they were placed
    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &Marker)> {
        self.markers.iter().map(|(handle, marker)| (*handle, marker))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MapSurface for MemorySurface {
    fn add_marker(&mut self, at: GeoPoint, style: &PinStyle) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(handle, Marker { at, style: style.clone() });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
    }
}
