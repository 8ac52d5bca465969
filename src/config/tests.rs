use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn config_with_dir(dir: &str) -> Config {
    Config {
        storage_dir: Some(dir.to_string()),
        mouse: None,
    }
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("lockcheck").join("lockcheck.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // First load should create default config
    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("Config::load() failed: {:?}", e);
    }
    let config = result.unwrap();
    assert!(config_path.exists());
    assert!(config.mouse_enabled());
    assert_eq!(config.storage_dir(), None);
}

#[test]
fn test_config_parse_all_fields() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("lockcheck.toml");
    fs::write(&path, "storage_dir = \"/var/tmp/lockcheck\"\nmouse = false\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(
        config.storage_dir(),
        Some(std::path::PathBuf::from("/var/tmp/lockcheck"))
    );
    assert!(!config.mouse_enabled());
}

#[test]
fn test_config_empty_file_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("lockcheck.toml");
    fs::write(&path, "").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, Config::default());
    assert!(config.mouse_enabled());
}

#[test]
fn test_config_unknown_field_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("lockcheck.toml");
    fs::write(&path, "storage_key = \"other\"\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_config_malformed_toml_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("lockcheck.toml");
    fs::write(&path, "mouse = \n").unwrap();

    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_config_validation_storage_dir() {
    assert!(validate_config(&Config::default()).is_ok());
    assert!(validate_config(&config_with_dir("/tmp/lockcheck")).is_ok());
    assert!(validate_config(&config_with_dir("~/lockcheck")).is_ok());

    let empty = validate_config(&config_with_dir("  ")).unwrap_err();
    assert!(empty.to_string().contains("cannot be empty"));

    let relative = validate_config(&config_with_dir("state/lockcheck")).unwrap_err();
    assert!(relative.to_string().contains("absolute path"));
}

#[test]
fn test_config_storage_dir_tilde_expansion() {
    let config = config_with_dir("~/records");
    if let Some(home) = dirs::home_dir() {
        assert_eq!(config.storage_dir(), Some(home.join("records")));
    }
}

#[test]
fn test_config_missing_file_is_error_for_load_from_path() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let err = load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}
