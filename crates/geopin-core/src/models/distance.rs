//! Distance values and the units the radius input may be given in.

use serde::{Deserialize, Serialize};

/// Distance units for user input and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    Meters,
    #[default]
    Kilometers,
    Miles,
    Feet,
}

impl DistanceUnit {
    /// Convert a distance value to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Meters => value,
            DistanceUnit::Kilometers => value * 1000.0,
            DistanceUnit::Miles => value * 1609.34,
            DistanceUnit::Feet => value * 0.3048,
        }
    }

    /// Convert a distance value from meters to this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Kilometers => meters / 1000.0,
            DistanceUnit::Miles => meters / 1609.34,
            DistanceUnit::Feet => meters / 0.3048,
        }
    }

    /// Short label used next to input fields
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Feet => "ft",
        }
    }
}

/// Distance with unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    /// Create a new distance
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    /// Create distance in meters
    pub fn meters(value: f64) -> Self {
        Self::new(value, DistanceUnit::Meters)
    }

    /// Create distance in kilometers
    pub fn kilometers(value: f64) -> Self {
        Self::new(value, DistanceUnit::Kilometers)
    }

    /// Convert to meters
    pub fn to_meters(&self) -> f64 {
        self.unit.to_meters(self.value)
    }
}

/// Render a meter value as kilometres with two decimals, e.g. `"12.35 km"`
pub fn format_kilometers(meters: f64) -> String {
    format!("{:.2} km", DistanceUnit::Kilometers.from_meters(meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilometers_to_meters() {
        assert_eq!(Distance::kilometers(5.0).to_meters(), 5000.0);
        assert_eq!(Distance::meters(250.0).to_meters(), 250.0);
    }

    #[test]
    fn test_unit_round_trip() {
        for unit in [
            DistanceUnit::Meters,
            DistanceUnit::Kilometers,
            DistanceUnit::Miles,
            DistanceUnit::Feet,
        ] {
            let meters = unit.to_meters(3.25);
            assert!((unit.from_meters(meters) - 3.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_format_kilometers() {
        assert_eq!(format_kilometers(12345.0), "12.35 km");
        assert_eq!(format_kilometers(0.0), "0.00 km");
        assert_eq!(format_kilometers(999.0), "1.00 km");
    }
}
