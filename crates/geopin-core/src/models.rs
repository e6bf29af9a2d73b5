pub mod distance;
pub mod mode;
pub mod pin;
pub mod place;
pub mod point;

pub use distance::{format_kilometers, Distance, DistanceUnit};
pub use mode::Mode;
pub use pin::{MarkerHandle, PinRole, PinStyle};
pub use place::{NearbyPlace, NearbyResult, NearestPlace, NewPlace, Place, PlaceId};
pub use point::{GeoPoint, ProjectedPoint};
