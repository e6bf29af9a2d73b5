use serde::Serialize;

use crate::models::{NearbyResult, NearestPlace, Place};

/// A result currently on display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayedResult {
    Created(Place),
    Nearby(NearbyResult),
    Nearest(NearestPlace),
    /// Meters
    Distance(f64),
}

/// Form input the presentation layer is asked to collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Name and type of a new place
    PlaceDetails,
    /// Search radius
    Radius,
}

/// Events the interaction core produces for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    ResultReady { result: DisplayedResult },
    InputRequired { input: InputKind },
    Notification { message: String },
    Error { message: String },
}

/// Port for the presentation layer (result panel, input forms, toasts)
pub trait Presenter {
    fn present(&mut self, event: PresentationEvent);
}

/// Collects events in order; handy for tests and scripted sessions
impl Presenter for Vec<PresentationEvent> {
    fn present(&mut self, event: PresentationEvent) {
        self.push(event);
    }
}
