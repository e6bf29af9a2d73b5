use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeopinError;

/// The workflow that governs how a map click is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Register a new named place at the clicked point
    #[default]
    Add,
    /// List places within a radius of the clicked point
    Nearby,
    /// Find the single closest place to the clicked point
    Nearest,
    /// Measure the distance between two clicked points
    Distance,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Add, Mode::Nearby, Mode::Nearest, Mode::Distance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Nearby => "nearby",
            Mode::Nearest => "nearest",
            Mode::Distance => "distance",
        }
    }

    /// Heading shown above the result panel for this mode
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Add => "Add New Place",
            Mode::Nearby => "Nearby Places",
            Mode::Nearest => "Nearest Place",
            Mode::Distance => "Distance",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GeopinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Mode::Add),
            "nearby" => Ok(Mode::Nearby),
            "nearest" => Ok(Mode::Nearest),
            "distance" => Ok(Mode::Distance),
            other => Err(GeopinError::validation(
                "mode",
                format!("unknown mode '{}'. Use add, nearby, nearest, or distance", other),
            )),
        }
    }
}
