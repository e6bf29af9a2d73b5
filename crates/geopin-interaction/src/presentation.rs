use geopin_core::models::PinRole;
use geopin_core::ports::{DisplayedResult, MapSurface};

use crate::pins::PinRegistry;

/// The result currently on display, if any
#[derive(Debug, Clone, Default)]
pub struct ResultPresentationState {
    current: Option<DisplayedResult>,
}

impl ResultPresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, result: DisplayedResult) {
        self.current = Some(result);
    }

    pub fn current(&self) -> Option<&DisplayedResult> {
        self.current.as_ref()
    }

    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    /// Close the result and remove transient distance pins
    pub fn dismiss<S: MapSurface>(&mut self, pins: &mut PinRegistry<S>) -> Option<DisplayedResult> {
        pins.remove_pins_by_role(PinRole::TransientDistance);
        self.current.take()
    }

    /// Drop the result without touching pins
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use geopin_core::models::{GeoPoint, PinStyle};

    #[test]
    fn test_dismiss_removes_only_transient_pins() {
        let at = GeoPoint::new(1.0, 1.0).unwrap();
        let mut pins = PinRegistry::new(MemorySurface::new());
        pins.add_pin(PinRole::Persistent, at, &PinStyle::place_dot());
        pins.add_pin(PinRole::TransientDistance, at, &PinStyle::distance_icon());

        let mut results = ResultPresentationState::new();
        results.show(DisplayedResult::Distance(1500.0));

        assert_eq!(results.dismiss(&mut pins), Some(DisplayedResult::Distance(1500.0)));
        assert!(!results.is_showing());
        assert_eq!(pins.count(PinRole::TransientDistance), 0);
        assert_eq!(pins.count(PinRole::Persistent), 1);
    }

    #[test]
    fn test_dismiss_without_result() {
        let mut pins = PinRegistry::new(MemorySurface::new());
        let mut results = ResultPresentationState::new();
        assert_eq!(results.dismiss(&mut pins), None);
    }
}
