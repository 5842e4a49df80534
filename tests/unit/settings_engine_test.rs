//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, and reset behavior.

use stark_browser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use stark_browser::types::errors::SettingsError;
use stark_browser::types::settings::{
    BrowserSettings, SessionOverrides, DEFAULT_HOMEPAGE, DEFAULT_SEARCH_URL,
};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, BrowserSettings::default());
    assert_eq!(settings.general.homepage, DEFAULT_HOMEPAGE);
    assert_eq!(settings.general.search_url, DEFAULT_SEARCH_URL);
    assert!(settings.appearance.dark_mode);
    assert!(settings.privacy.ad_blocking);
}

/// A new engine reading the same file must see a value set by an earlier one.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("appearance.dark_mode", serde_json::json!(false))
            .unwrap();
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        let loaded = engine2.load().unwrap();
        assert!(!loaded.appearance.dark_mode);
    }
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine
        .set_value("general.homepage", serde_json::json!("https://example.com/"))
        .unwrap();
    engine
        .set_value("privacy.extra_ad_domains", serde_json::json!(["ads.example"]))
        .unwrap();
    assert_ne!(engine.get_settings(), &BrowserSettings::default());

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &BrowserSettings::default());

    let mut engine2 = engine_in_temp(&dir);
    assert_eq!(engine2.load().unwrap(), BrowserSettings::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"appearance":{"dark_mode":false}}"#).unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let settings = engine.load().unwrap();

    assert!(!settings.appearance.dark_mode);
    assert_eq!(settings.general.homepage, DEFAULT_HOMEPAGE);
    assert_eq!(settings.window.width, 1024.0);
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_set_value_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let result = engine.set_value("general.language", serde_json::json!("en"));
    assert!(matches!(result, Err(SettingsError::InvalidKey(_))));

    let result = engine.set_value("", serde_json::json!(true));
    assert!(matches!(result, Err(SettingsError::InvalidKey(_))));
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let result = engine.set_value("appearance.dark_mode", serde_json::json!("yes"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert!(engine.get_settings().appearance.dark_mode);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");
    let engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    engine.save().unwrap();
    assert!(path.exists());
}

#[test]
fn test_overrides_are_never_written() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_overrides(SessionOverrides {
        dark_mode: Some(false),
        ad_blocking: Some(false),
    });
    engine
        .set_value("general.homepage", serde_json::json!("https://home.example/"))
        .unwrap();

    assert!(!engine.get_settings().privacy.ad_blocking);
    assert_eq!(engine.get_settings().general.homepage, "https://home.example/");

    let mut reloaded = engine_in_temp(&dir);
    let saved = reloaded.load().unwrap();
    assert!(saved.privacy.ad_blocking);
    assert!(saved.appearance.dark_mode);
    assert_eq!(saved.general.homepage, "https://home.example/");
}

#[test]
fn test_failed_load_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let original = r#"{"general": {"homepage": "https://mine.example/",}}"#;
    std::fs::write(&path, original).unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    assert!(engine.load().is_err());
    assert!(!engine.is_writable());

    let result = engine.set_value("appearance.dark_mode", serde_json::json!(false));
    assert!(matches!(result, Err(SettingsError::ReadOnly(_))));
    // The change still holds for this run.
    assert!(!engine.get_settings().appearance.dark_mode);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}
