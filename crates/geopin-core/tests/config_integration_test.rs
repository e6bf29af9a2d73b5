//! Integration tests for layered configuration
//!
//! Precedence: CLI arguments > Environment variables > Config file > Defaults

use geopin_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use geopin_core::models::DistanceUnit;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("GEOPIN_API_URL");
    env::remove_var("GEOPIN_RADIUS_UNIT");
    env::remove_var("GEOPIN_REQUEST_TIMEOUT");
}

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_url = "http://file.test/api"
radius_unit = "meters"
"#
    )
    .unwrap();
    file
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file();
    env::set_var("GEOPIN_API_URL", "http://env.test/api");
    env::set_var("GEOPIN_REQUEST_TIMEOUT", "30");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.api_url.value, "http://env.test/api");
    assert_eq!(config.api_url.source, ConfigSource::Environment);
    assert_eq!(config.request_timeout_secs.value, Some(30));
    // File value survives where the environment is silent
    assert_eq!(config.radius_unit.value, DistanceUnit::Meters);
    assert_eq!(config.radius_unit.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("GEOPIN_RADIUS_UNIT", "leagues");
    env::set_var("GEOPIN_REQUEST_TIMEOUT", "soon");
    env::set_var("GEOPIN_API_URL", "not a url");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.radius_unit.value, DistanceUnit::Kilometers);
    assert_eq!(config.radius_unit.source, ConfigSource::Default);
    assert_eq!(config.request_timeout_secs.value, None);
    assert_eq!(config.api_url.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_full_precedence_chain() {
    clear_env();
    let file = config_file();
    env::set_var("GEOPIN_RADIUS_UNIT", "mi");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    config.update_from_cli(CliConfigOverrides {
        radius_unit: Some(DistanceUnit::Feet),
        ..Default::default()
    });

    assert_eq!(config.radius_unit.value, DistanceUnit::Feet);
    assert_eq!(config.radius_unit.source, ConfigSource::Cli);
    assert_eq!(config.api_url.source, ConfigSource::File);

    let inspection = config.to_inspection_map();
    assert_eq!(inspection["api_url"].0, "http://file.test/api");
    assert_eq!(inspection["request_timeout_secs"].0, "transport default");

    clear_env();
}
