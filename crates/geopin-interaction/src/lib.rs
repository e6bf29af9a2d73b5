//! GeoPin Interaction - The map click state machine
//!
//! This crate tracks the active mode, interprets map clicks in light of it,
//! drives place service queries, and manages the lifecycle of the pins those
//! workflows leave on the map.

pub mod dispatcher;
pub mod distance;
pub mod mode;
pub mod pins;
pub mod presentation;
pub mod surface;

pub use dispatcher::{parse_radius, InteractionDispatcher, PendingQuery, QueryCompletion};
pub use distance::{DistanceAccumulator, Push};
pub use mode::{InputFields, ModeController, PendingSelection, Ticket};
pub use pins::PinRegistry;
pub use presentation::ResultPresentationState;
pub use surface::MemorySurface;
