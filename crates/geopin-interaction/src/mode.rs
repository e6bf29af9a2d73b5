use geopin_core::models::{GeoPoint, Mode, PinRole};
use geopin_core::ports::MapSurface;
use uuid::Uuid;

use crate::distance::DistanceAccumulator;
use crate::pins::PinRegistry;

/// Point clicked in Add or Nearby mode, waiting for the rest of the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSelection {
    pub point: GeoPoint,
    /// Creation key reused by manual retries of the same selection
    pub idempotency_key: Uuid,
}

/// Raw text of the mode-scoped form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub name: String,
    pub place_type: String,
    pub radius: String,
}

/// Identifies the mode session a query was issued in, and for distance
/// queries the measurement it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    mode: Mode,
    session: u64,
    measurement: u64,
}

impl Ticket {
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Owner of the active mode and all state scoped to it.
///
/// Every `set_mode` call starts a new session, even when the mode is
/// unchanged.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    session: u64,
    pending: Option<PendingSelection>,
    inputs: InputFields,
    distance: DistanceAccumulator,
    distance_hint_shown: bool,
    measurement: u64,
    creating: Option<Uuid>,
}

impl ModeController {
    pub fn new(initial: Mode) -> Self {
        Self {
            mode: initial,
            session: 0,
            pending: None,
            inputs: InputFields::default(),
            distance: DistanceAccumulator::new(),
            distance_hint_shown: false,
            measurement: 0,
            creating: None,
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode and clear every piece of per-mode state, including
    /// transient distance pins.
    pub fn set_mode<S: MapSurface>(&mut self, mode: Mode, pins: &mut PinRegistry<S>) {
        tracing::debug!(from = %self.mode, to = %mode, "Mode change");
        self.mode = mode;
        self.session += 1;
        self.pending = None;
        self.inputs = InputFields::default();
        self.distance.reset();
        self.distance_hint_shown = false;
        self.creating = None;
        pins.remove_pins_by_role(PinRole::TransientDistance);
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            mode: self.mode,
            session: self.session,
            measurement: self.measurement,
        }
    }

    /// Whether a query issued under `ticket` may still apply its result
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.mode == self.mode && ticket.session == self.session
    }

    /// Whether a distance issued under `ticket` still has its pins on the map
    pub fn is_current_measurement(&self, ticket: Ticket) -> bool {
        self.is_current(ticket) && ticket.measurement == self.measurement
    }

    /// Abandon the current measurement. Distances already in flight for it
    /// will be discarded.
    pub fn start_measurement(&mut self) {
        self.measurement += 1;
        self.distance.reset();
    }

    /// Mark `key` as being created. False if it is already in flight.
    pub fn begin_creation(&mut self, key: Uuid) -> bool {
        if self.creating == Some(key) {
            return false;
        }
        self.creating = Some(key);
        true
    }

    pub fn finish_creation(&mut self, key: Uuid) {
        if self.creating == Some(key) {
            self.creating = None;
        }
    }

    pub fn creation_in_flight(&self) -> Option<Uuid> {
        self.creating
    }

    /// Record a clicked point. A new point gets a new creation key.
    pub fn select(&mut self, point: GeoPoint) -> PendingSelection {
        let selection = PendingSelection {
            point,
            idempotency_key: Uuid::new_v4(),
        };
        self.pending = Some(selection);
        selection
    }

    pub fn pending(&self) -> Option<PendingSelection> {
        self.pending
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn inputs(&self) -> &InputFields {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputFields {
        &mut self.inputs
    }

    pub fn distance(&self) -> &DistanceAccumulator {
        &self.distance
    }

    pub fn distance_mut(&mut self) -> &mut DistanceAccumulator {
        &mut self.distance
    }

    /// True the first time it is called in a session
    pub fn take_distance_hint(&mut self) -> bool {
        !std::mem::replace(&mut self.distance_hint_shown, true)
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use geopin_core::models::PinStyle;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_set_mode_clears_scoped_state() {
        let mut pins = PinRegistry::new(MemorySurface::new());
        let mut modes = ModeController::new(Mode::Distance);
        modes.select(pt(1.0, 1.0));
        modes.inputs_mut().radius = "5".to_string();
        modes.distance_mut().push(pt(2.0, 2.0));
        pins.add_pin(PinRole::TransientDistance, pt(2.0, 2.0), &PinStyle::distance_icon());
        pins.add_pin(PinRole::Persistent, pt(3.0, 3.0), &PinStyle::place_dot());
        assert!(modes.take_distance_hint());

        modes.set_mode(Mode::Nearby, &mut pins);

        assert_eq!(modes.current_mode(), Mode::Nearby);
        assert_eq!(modes.pending(), None);
        assert_eq!(modes.inputs(), &InputFields::default());
        assert!(modes.distance().is_empty());
        assert_eq!(pins.count(PinRole::TransientDistance), 0);
        assert_eq!(pins.count(PinRole::Persistent), 1);
        assert!(modes.take_distance_hint());
    }

    #[test]
    fn test_ticket_invalidated_by_any_mode_change() {
        let mut pins = PinRegistry::new(MemorySurface::new());
        let mut modes = ModeController::new(Mode::Nearest);
        let ticket = modes.ticket();
        assert!(modes.is_current(ticket));

        // Leaving and re-entering starts a new session
        modes.set_mode(Mode::Add, &mut pins);
        modes.set_mode(Mode::Nearest, &mut pins);
        assert!(!modes.is_current(ticket));
        assert_eq!(ticket.mode(), Mode::Nearest);
    }

    #[test]
    fn test_distance_hint_once_per_session() {
        let mut modes = ModeController::new(Mode::Distance);
        assert!(modes.take_distance_hint());
        assert!(!modes.take_distance_hint());
        assert!(!modes.take_distance_hint());
    }

    #[test]
    fn test_creation_key_blocks_until_finished() {
        let mut pins = PinRegistry::new(MemorySurface::new());
        let mut modes = ModeController::default();
        let key = modes.select(pt(1.0, 1.0)).idempotency_key;

        assert!(modes.begin_creation(key));
        assert!(!modes.begin_creation(key));
        modes.finish_creation(Uuid::new_v4());
        assert_eq!(modes.creation_in_flight(), Some(key));
        modes.finish_creation(key);
        assert!(modes.begin_creation(key));

        modes.set_mode(Mode::Add, &mut pins);
        assert_eq!(modes.creation_in_flight(), None);
    }

    #[test]
    fn test_new_measurement_invalidates_distance_ticket() {
        let mut modes = ModeController::new(Mode::Distance);
        modes.distance_mut().push(pt(1.0, 1.0));
        let ticket = modes.ticket();

        modes.start_measurement();

        assert!(modes.is_current(ticket));
        assert!(!modes.is_current_measurement(ticket));
        assert!(modes.distance().is_empty());
        assert!(modes.is_current_measurement(modes.ticket()));
    }

    #[test]
    fn test_new_selection_gets_new_key() {
        let mut modes = ModeController::default();
        let first = modes.select(pt(1.0, 1.0));
        let second = modes.select(pt(1.0, 1.0));
        assert_ne!(first.idempotency_key, second.idempotency_key);
        assert_eq!(modes.pending(), Some(second));
    }
}
