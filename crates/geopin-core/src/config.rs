use crate::error::{GeopinError, Result};
use crate::models::DistanceUnit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://gis.thynxai.tech/api";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Initial view of the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            latitude: 20.296059,
            longitude: 85.824539,
            zoom: 12,
        }
    }
}

/// Layered configuration for the map client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_url: ConfigValue<String>,
    pub radius_unit: ConfigValue<DistanceUnit>,
    /// `None` leaves the transport default in place
    pub request_timeout_secs: ConfigValue<Option<u64>>,
    pub view: ConfigValue<MapView>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_url: ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default),
            radius_unit: ConfigValue::new(DistanceUnit::Kilometers, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(None, ConfigSource::Default),
            view: ConfigValue::new(MapView::default(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeopinError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeopinError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(api_url) = file_config.api_url {
            self.api_url.update(normalize_api_url(&api_url)?, ConfigSource::File);
        }

        if let Some(radius_unit) = file_config.radius_unit {
            self.radius_unit.update(parse_distance_unit(&radius_unit)?, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(Some(timeout), ConfigSource::File);
        }

        if let Some(view) = file_config.view {
            self.view.update(view, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOPIN_API_URL
        if let Ok(url) = env::var("GEOPIN_API_URL") {
            match normalize_api_url(&url) {
                Ok(url) => self.api_url.update(url, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPIN_API_URL value '{}': expected an http(s) URL",
                    url
                ),
            }
        }

        // GEOPIN_RADIUS_UNIT
        if let Ok(unit_str) = env::var("GEOPIN_RADIUS_UNIT") {
            match parse_distance_unit(&unit_str) {
                Ok(unit) => self.radius_unit.update(unit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPIN_RADIUS_UNIT value '{}': expected meters, kilometers, miles, or feet",
                    unit_str
                ),
            }
        }

        // GEOPIN_REQUEST_TIMEOUT
        if let Ok(timeout_str) = env::var("GEOPIN_REQUEST_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(secs) => self.request_timeout_secs.update(Some(secs), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPIN_REQUEST_TIMEOUT value '{}': expected whole seconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(api_url) = overrides.api_url {
            self.api_url.update(api_url, ConfigSource::Cli);
        }

        if let Some(radius_unit) = overrides.radius_unit {
            self.radius_unit.update(radius_unit, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs.update(Some(timeout), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("api_url".to_string(), (self.api_url.value.clone(), self.api_url.source));

        map.insert(
            "radius_unit".to_string(),
            (format!("{:?}", self.radius_unit.value), self.radius_unit.source),
        );

        map.insert(
            "request_timeout_secs".to_string(),
            (
                self.request_timeout_secs
                    .value
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "transport default".to_string()),
                self.request_timeout_secs.source,
            ),
        );

        let view = &self.view.value;
        map.insert(
            "view".to_string(),
            (format!("{}, {} @ z{}", view.latitude, view.longitude, view.zoom), self.view.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_url: Option<String>,
    radius_unit: Option<String>,
    request_timeout_secs: Option<u64>,
    view: Option<MapView>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_url: Option<String>,
    pub radius_unit: Option<DistanceUnit>,
    pub request_timeout_secs: Option<u64>,
}

/// Parse distance unit from string
pub fn parse_distance_unit(s: &str) -> Result<DistanceUnit> {
    match s.to_lowercase().as_str() {
        "meters" | "m" => Ok(DistanceUnit::Meters),
        "kilometers" | "km" => Ok(DistanceUnit::Kilometers),
        "miles" | "mi" => Ok(DistanceUnit::Miles),
        "feet" | "ft" => Ok(DistanceUnit::Feet),
        _ => Err(GeopinError::ConfigInvalid {
            key: "radius_unit".to_string(),
            reason: format!("Invalid distance unit: {}. Use meters, kilometers, miles, or feet", s),
        }),
    }
}

/// Check the scheme and drop any trailing slash so paths can be appended
pub fn normalize_api_url(s: &str) -> Result<String> {
    let trimmed = s.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(GeopinError::ConfigInvalid {
            key: "api_url".to_string(),
            reason: format!("Invalid API URL: {}. Expected http:// or https://", s),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.radius_unit.value, DistanceUnit::Kilometers);
        assert_eq!(config.request_timeout_secs.value, None);
        assert_eq!(config.view.value.zoom, 12);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_url = "http://localhost:8080/api/"
radius_unit = "mi"
request_timeout_secs = 15

[view]
latitude = 51.5
longitude = -0.12
zoom = 10
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.api_url.value, "http://localhost:8080/api");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.radius_unit.value, DistanceUnit::Miles);
        assert_eq!(config.request_timeout_secs.value, Some(15));
        assert_eq!(config.view.value.zoom, 10);
    }

    #[test]
    fn test_file_with_bad_unit_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"radius_unit = "furlongs""#).unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(GeopinError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            api_url: Some("http://127.0.0.1:9000".to_string()),
            radius_unit: None,
            request_timeout_secs: Some(5),
        });

        assert_eq!(config.api_url.value, "http://127.0.0.1:9000");
        assert_eq!(config.api_url.source, ConfigSource::Cli);
        assert_eq!(config.request_timeout_secs.value, Some(5));
        // Untouched values keep their default source
        assert_eq!(config.radius_unit.source, ConfigSource::Default);
    }

    #[test]
    fn test_normalize_api_url() {
        assert_eq!(normalize_api_url("https://x.test/api/").unwrap(), "https://x.test/api");
        assert!(normalize_api_url("ftp://x.test").is_err());
    }

    #[test]
    fn test_parse_distance_unit() {
        assert_eq!(parse_distance_unit("km").unwrap(), DistanceUnit::Kilometers);
        assert_eq!(parse_distance_unit("Meters").unwrap(), DistanceUnit::Meters);
        assert!(parse_distance_unit("parsecs").is_err());
    }
}
