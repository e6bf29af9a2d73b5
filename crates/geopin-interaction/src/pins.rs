use geopin_core::models::{GeoPoint, MarkerHandle, PinRole, PinStyle};
use geopin_core::ports::MapSurface;
use std::collections::HashMap;

/// Tracks the markers this client placed, indexed by role.
///
/// Removing by role only touches that role's index, and removing one pin
/// only touches its owner's.
#[derive(Debug)]
pub struct PinRegistry<S> {
    surface: S,
    by_role: HashMap<PinRole, Vec<MarkerHandle>>,
    owner: HashMap<MarkerHandle, PinRole>,
}

impl<S: MapSurface> PinRegistry<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            by_role: HashMap::new(),
            owner: HashMap::new(),
        }
    }

    pub fn add_pin(&mut self, role: PinRole, at: GeoPoint, style: &PinStyle) -> MarkerHandle {
        let handle = self.surface.add_marker(at, style);
        self.by_role.entry(role).or_default().push(handle);
        self.owner.insert(handle, role);
        tracing::debug!(?role, ?handle, "Pinned {}", at);
        handle
    }

    /// Remove every pin of `role`. Returns how many were removed.
    pub fn remove_pins_by_role(&mut self, role: PinRole) -> usize {
        let handles = self.by_role.remove(&role).unwrap_or_default();
        for handle in &handles {
            self.owner.remove(handle);
            self.surface.remove_marker(*handle);
        }
        if !handles.is_empty() {
            tracing::debug!(?role, "Removed {} pins", handles.len());
        }
        handles.len()
    }

    /// Remove a single pin. Returns false if this registry does not own it.
    pub fn remove_pin(&mut self, handle: MarkerHandle) -> bool {
        let Some(role) = self.owner.remove(&handle) else {
            return false;
        };
        if let Some(handles) = self.by_role.get_mut(&role) {
            handles.retain(|h| *h != handle);
        }
        self.surface.remove_marker(handle);
        true
    }

    pub fn role_of(&self, handle: MarkerHandle) -> Option<PinRole> {
        self.owner.get(&handle).copied()
    }

    pub fn pins(&self, role: PinRole) -> &[MarkerHandle] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, role: PinRole) -> usize {
        self.pins(role).len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
