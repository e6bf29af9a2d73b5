//! Click routing and query orchestration.
//!
//! Clicks and form actions mutate state synchronously and may hand back a
//! [`PendingQuery`]. The caller drives that future wherever it likes and
//! passes its [`QueryCompletion`] to [`InteractionDispatcher::complete`] on
//! the same task that delivers clicks, so state is only ever touched from one
//! place. Completions whose mode session has ended are discarded, as are
//! distances whose pins were dismissed or replaced by a new measurement.

use futures::future::{BoxFuture, FutureExt};
use geopin_core::error::{GeopinError, Result};
use geopin_core::models::{
    Distance, DistanceUnit, GeoPoint, Mode, NearbyResult, NearestPlace, NewPlace, Place, PinRole,
    PinStyle,
};
use geopin_core::ports::{
    DisplayedResult, GeoQueryService, InputKind, MapSurface, PresentationEvent, Presenter,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::distance::Push;
use crate::mode::{ModeController, PendingSelection, Ticket};
use crate::pins::PinRegistry;
use crate::presentation::ResultPresentationState;

/// An issued place service call, ready to be awaited
pub type PendingQuery = BoxFuture<'static, QueryCompletion>;

/// A finished query, tagged with the session that issued it
#[derive(Debug)]
pub struct QueryCompletion {
    ticket: Ticket,
    outcome: QueryOutcome,
}

impl QueryCompletion {
    pub fn mode(&self) -> Mode {
        self.ticket.mode()
    }
}

#[derive(Debug)]
enum QueryOutcome {
    Created {
        at: GeoPoint,
        key: Uuid,
        result: Result<Place>,
    },
    Nearby(Result<NearbyResult>),
    Nearest(Result<NearestPlace>),
    Distance(Result<f64>),
}

const PLACE_DETAILS_REQUIRED: &str = "Name, Type, and a valid location are required";

/// Parse the radius field. Empty, non-numeric, and non-positive values are
/// rejected before anything reaches the service.
pub fn parse_radius(input: &str, unit: DistanceUnit) -> Result<Distance> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GeopinError::validation("radius", "Input radius"));
    }
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(Distance::new(value, unit)),
        _ => Err(GeopinError::validation(
            "radius",
            format!("'{}' is not a positive number of {}", input, unit.abbreviation()),
        )),
    }
}

/// Routes map clicks and form actions according to the active mode
pub struct InteractionDispatcher<Q: ?Sized, S, P> {
    service: Arc<Q>,
    modes: ModeController,
    pins: PinRegistry<S>,
    results: ResultPresentationState,
    presenter: P,
    radius_unit: DistanceUnit,
}

impl<Q, S, P> InteractionDispatcher<Q, S, P>
where
    Q: GeoQueryService + ?Sized + 'static,
    S: MapSurface,
    P: Presenter,
{
    /// Start in Add mode with radius input in kilometres
    pub fn new(service: Arc<Q>, surface: S, presenter: P) -> Self {
        Self {
            service,
            modes: ModeController::new(Mode::Add),
            pins: PinRegistry::new(surface),
            results: ResultPresentationState::new(),
            presenter,
            radius_unit: DistanceUnit::Kilometers,
        }
    }

    pub fn with_radius_unit(mut self, unit: DistanceUnit) -> Self {
        self.radius_unit = unit;
        self
    }

    pub fn current_mode(&self) -> Mode {
        self.modes.current_mode()
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    pub fn pins(&self) -> &PinRegistry<S> {
        &self.pins
    }

    pub fn results(&self) -> &ResultPresentationState {
        &self.results
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn radius_unit(&self) -> DistanceUnit {
        self.radius_unit
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.modes.set_mode(mode, &mut self.pins);
        self.results.clear();
        if mode == Mode::Distance {
            self.notify("Click on the map to select the first point");
        }
    }

    pub fn set_place_name(&mut self, name: &str) {
        self.modes.inputs_mut().name = name.to_string();
    }

    pub fn set_place_type(&mut self, place_type: &str) {
        self.modes.inputs_mut().place_type = place_type.to_string();
    }

    pub fn set_radius(&mut self, radius: &str) {
        self.modes.inputs_mut().radius = radius.to_string();
    }

    /// Interpret a click at `coord` in the current mode
    pub fn on_map_click(&mut self, coord: GeoPoint) -> Option<PendingQuery> {
        match self.modes.current_mode() {
            Mode::Add => {
                self.modes.select(coord);
                self.presenter.present(PresentationEvent::InputRequired {
                    input: InputKind::PlaceDetails,
                });
                None
            }
            Mode::Nearby => {
                self.modes.select(coord);
                self.presenter.present(PresentationEvent::InputRequired {
                    input: InputKind::Radius,
                });
                None
            }
            Mode::Nearest => {
                let service = Arc::clone(&self.service);
                Some(self.issue(async move {
                    QueryOutcome::Nearest(service.find_nearest(coord).await)
                }))
            }
            Mode::Distance => self.on_distance_click(coord),
        }
    }

    fn on_distance_click(&mut self, coord: GeoPoint) -> Option<PendingQuery> {
        if self.modes.distance().is_empty() {
            // A new measurement replaces the previous pair's pins
            self.modes.start_measurement();
            self.pins.remove_pins_by_role(PinRole::TransientDistance);
        }
        self.pins.add_pin(PinRole::TransientDistance, coord, &PinStyle::distance_icon());

        match self.modes.distance_mut().push(coord) {
            Push::Buffered => {
                if self.modes.take_distance_hint() {
                    self.notify("Click on the map to select the second point");
                }
                None
            }
            Push::Complete { first, second } => {
                tracing::debug!("Measuring {} -> {}", first, second);
                let service = Arc::clone(&self.service);
                Some(self.issue(async move {
                    QueryOutcome::Distance(service.compute_distance(first, second).await)
                }))
            }
        }
    }

    /// Submit the form of the current mode
    pub fn confirm(&mut self) -> Option<PendingQuery> {
        match self.modes.current_mode() {
            Mode::Add => self.confirm_add(),
            Mode::Nearby => self.confirm_nearby(),
            mode => {
                tracing::debug!("Nothing to confirm in {} mode", mode);
                None
            }
        }
    }

    fn confirm_add(&mut self) -> Option<PendingQuery> {
        let Some(PendingSelection { point, idempotency_key }) = self.modes.pending() else {
            self.report(PLACE_DETAILS_REQUIRED.to_string());
            return None;
        };
        let inputs = self.modes.inputs();
        let request = match NewPlace::new(&inputs.name, &inputs.place_type, point, idempotency_key)
        {
            Ok(request) => request,
            Err(_) => {
                self.report(PLACE_DETAILS_REQUIRED.to_string());
                return None;
            }
        };
        if !self.modes.begin_creation(idempotency_key) {
            self.report("This place is still being created".to_string());
            return None;
        }

        let service = Arc::clone(&self.service);
        Some(self.issue(async move {
            let result = service.create_place(&request).await;
            QueryOutcome::Created {
                at: request.location,
                key: request.idempotency_key,
                result,
            }
        }))
    }

    fn confirm_nearby(&mut self) -> Option<PendingQuery> {
        let Some(selection) = self.modes.pending() else {
            self.report("Select a point on the map first".to_string());
            return None;
        };
        let radius = match parse_radius(&self.modes.inputs().radius, self.radius_unit) {
            Ok(radius) => radius,
            Err(GeopinError::Validation { reason, .. }) => {
                self.report(reason);
                return None;
            }
            Err(e) => {
                self.report(e.to_string());
                return None;
            }
        };

        let origin = selection.point;
        self.pins.add_pin(PinRole::Persistent, origin, &PinStyle::place_dot());
        self.modes.clear_pending();

        let service = Arc::clone(&self.service);
        Some(self.issue(async move {
            QueryOutcome::Nearby(service.find_nearby(origin, radius).await)
        }))
    }

    /// Close the displayed result, clearing transient pins and form input
    pub fn dismiss(&mut self) {
        self.results.dismiss(&mut self.pins);
        self.modes.start_measurement();
        self.modes.clear_pending();
        *self.modes.inputs_mut() = Default::default();
    }

    /// Apply a finished query.
    ///
    /// # Errors
    /// `StaleResultDiscarded` if the issuing mode session has ended, or for a
    /// distance whose measurement was dismissed or replaced; nothing is shown
    /// in that case. Service failures are reported to the presenter and
    /// return `Ok`.
    pub fn complete(&mut self, completion: QueryCompletion) -> Result<()> {
        let ticket = completion.ticket;
        let current = match completion.outcome {
            QueryOutcome::Distance(_) => self.modes.is_current_measurement(ticket),
            _ => self.modes.is_current(ticket),
        };
        if !current {
            tracing::debug!(mode = %ticket.mode(), "Discarding stale result");
            return Err(GeopinError::StaleResultDiscarded);
        }

        match completion.outcome {
            QueryOutcome::Created { at, key, result } => match result {
                Ok(place) => {
                    self.modes.finish_creation(key);
                    self.pins.add_pin(PinRole::Persistent, at, &PinStyle::place_dot());
                    if self.modes.pending().is_some_and(|p| p.idempotency_key == key) {
                        self.modes.clear_pending();
                    }
                    let inputs = self.modes.inputs_mut();
                    inputs.name.clear();
                    inputs.place_type.clear();
                    self.notify("New place created successfully");
                    self.show(DisplayedResult::Created(place));
                }
                Err(e) => {
                    self.modes.finish_creation(key);
                    tracing::warn!("Failed to create place: {}", e);
                    self.report(format!("Failed to create place: {}", e));
                }
            },
            QueryOutcome::Nearby(result) => match result {
                Ok(places) => {
                    self.notify(&format!("Found {} nearby places", places.len()));
                    for entry in &places {
                        self.pins.add_pin(
                            PinRole::Persistent,
                            entry.place.location,
                            &PinStyle::place_dot(),
                        );
                    }
                    self.show(DisplayedResult::Nearby(places));
                }
                Err(e) => {
                    tracing::warn!("Nearby search failed: {}", e);
                    self.report(format!("Error fetching nearby places: {}", e));
                }
            },
            QueryOutcome::Nearest(result) => match result {
                Ok(nearest) => {
                    self.pins.add_pin(
                        PinRole::Persistent,
                        nearest.place.location,
                        &PinStyle::place_dot(),
                    );
                    self.show(DisplayedResult::Nearest(nearest));
                }
                Err(GeopinError::NotFound(_)) => {
                    self.report("No place found".to_string());
                }
                Err(e) => {
                    tracing::warn!("Nearest search failed: {}", e);
                    self.report("Error fetching nearest place. Please try again.".to_string());
                }
            },
            QueryOutcome::Distance(result) => match result {
                Ok(meters) => self.show(DisplayedResult::Distance(meters)),
                Err(e) => {
                    tracing::warn!("Distance computation failed: {}", e);
                    self.report("Failed to get distance".to_string());
                }
            },
        }
        Ok(())
    }

    fn issue<F>(&self, outcome: F) -> PendingQuery
    where
        F: std::future::Future<Output = QueryOutcome> + Send + 'static,
    {
        let ticket = self.modes.ticket();
        outcome
            .map(move |outcome| QueryCompletion { ticket, outcome })
            .boxed()
    }

    fn show(&mut self, result: DisplayedResult) {
        self.results.show(result.clone());
        self.presenter.present(PresentationEvent::ResultReady { result });
    }

    fn notify(&mut self, message: &str) {
        self.presenter.present(PresentationEvent::Notification {
            message: message.to_string(),
        });
    }

    fn report(&mut self, message: String) {
        self.presenter.present(PresentationEvent::Error { message });
    }
}
