//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use marbles::config::AppConfig;
use serial_test::serial;

fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("marbles_config_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("MARBLES_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("MARBLES_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("MARBLES_INTERACTION__THROW_STRENGTH", "42.5");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("MARBLES_INTERACTION__THROW_STRENGTH");
    assert_eq!(config.interaction.throw_strength, 42.5);
}

#[test]
#[serial]
fn test_shipped_default_file_matches_builtin_defaults() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config");
    assert!(dir.join("default.toml").exists());
    let config = AppConfig::load_from(&dir).unwrap();
    let builtin = AppConfig::default();
    assert_eq!(config.window, builtin.window);
    assert_eq!(config.camera, builtin.camera);
    assert_eq!(config.interaction, builtin.interaction);
    assert_eq!(config.rendering, builtin.rendering);
    assert!((config.physics.timestep - builtin.physics.timestep).abs() < 1e-6);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = temp_config_dir("missing");
    let config = AppConfig::load_from(dir.join("nope")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = temp_config_dir("layered");
    fs::write(
        dir.join("default.toml"),
        "[interaction]\nthrow_strength = 20.0\nrespawn_enabled = false\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[interaction]\nrespawn_enabled = true\nspawn_points = [[-1.0, 5.0, 0.0], [1.0, 5.0, 0.0]]\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.interaction.throw_strength, 20.0);
    assert!(config.interaction.respawn_enabled);
    assert_eq!(config.interaction.spawn_points.len(), 2);
    // Untouched sections keep their defaults
    assert_eq!(config.window.title, "Marbles");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    let dir = temp_config_dir("invalid");
    fs::write(dir.join("user.toml"), "[interaction]\nmarble_radius = -1.0\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().contains("marble_radius"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let dir = temp_config_dir("malformed");
    fs::write(dir.join("default.toml"), "[window\ntitle = ").unwrap();
    assert!(AppConfig::load_from(&dir).is_err());
    fs::remove_dir_all(&dir).unwrap();
}
