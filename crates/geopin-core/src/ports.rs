//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod presenter;
pub mod query;
pub mod surface;

pub use presenter::{DisplayedResult, InputKind, PresentationEvent, Presenter};
pub use query::GeoQueryService;
pub use surface::MapSurface;
