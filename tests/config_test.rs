//! Tests for configuration files

use hand_actuator::{
    config::{Config, EXAMPLE_CONFIG},
    Error,
};
use std::{fs, path::PathBuf};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hand_actuator_{}_{}.yaml", name, std::process::id()))
}

#[test]
fn test_save_and_load() {
    let path = temp_path("save_and_load");

    let mut config = Config::default();
    config.camera.index = 2;
    config.filter.kind = "none".to_string();
    config.display.mirror = false;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded.camera.index, 2);
    assert_eq!(loaded.filter.kind, "none");
    assert!(!loaded.display.mirror);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_example_file_loads() {
    let path = temp_path("example");
    fs::write(&path, EXAMPLE_CONFIG).unwrap();

    let loaded = Config::from_file(&path);
    fs::remove_file(&path).unwrap();

    assert!(loaded.unwrap().validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Config::from_file(temp_path("does_not_exist"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_values_rejected() {
    let zone = Config::from_yaml("zone:\n  margin_x_fraction: 0.7\n").unwrap();
    assert!(matches!(zone.validate(), Err(Error::ConfigError(_))));

    let presence = Config::from_yaml("detector:\n  min_presence: 1.5\n").unwrap();
    assert!(presence.validate().is_err());

    let camera = Config::from_yaml("camera:\n  width: 0\n").unwrap();
    assert!(camera.validate().is_err());

    let radius = Config::from_yaml("display:\n  marker_radius: -1\n").unwrap();
    assert!(radius.validate().is_err());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("camera:\n  index: 1\n  fps: 30\n").unwrap();
    assert_eq!(config.camera.index, 1);
}
