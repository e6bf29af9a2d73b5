use serde::{Deserialize, Serialize};

/// Lifecycle class of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinRole {
    /// Accumulates across interactions and is never removed automatically
    Persistent,
    /// Belongs to a distance measurement; removed in bulk on dismissal,
    /// on a new measurement, or on mode change
    TransientDistance,
}

/// Identity of a marker on the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

/// Visual style of a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PinStyle {
    Circle {
        radius: f32,
        fill: String,
        stroke: String,
        stroke_width: f32,
    },
    Icon {
        src: String,
        scale: f32,
    },
}

impl PinStyle {
    /// Blue dot with a white ring, used for places and query origins
    pub fn place_dot() -> Self {
        PinStyle::Circle {
            radius: 6.0,
            fill: "blue".to_string(),
            stroke: "white".to_string(),
            stroke_width: 2.0,
        }
    }

    /// Pin icon used for distance endpoints
    pub fn distance_icon() -> Self {
        PinStyle::Icon {
            src: "/pin.png".to_string(),
            scale: 0.1,
        }
    }
}
