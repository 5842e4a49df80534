// Stark Browser Settings Engine
// Keeps two layers: the settings mirrored in the JSON file, and command-line
// overrides laid on top for the current run. Only the file layer is ever saved.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{BrowserSettings, SessionOverrides};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BrowserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BrowserSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine backed by a JSON file in the platform config directory.
pub struct SettingsEngine {
    config_path: String,
    /// What the file holds, or will hold after the next save.
    stored: BrowserSettings,
    overrides: SessionOverrides,
    /// `stored` with `overrides` applied; what the browser runs with.
    effective: BrowserSettings,
    /// Cleared when an existing file could not be read, so it is never
    /// replaced by defaults.
    writable: bool,
}

impl SettingsEngine {
    /// `path_override` replaces `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            config_path,
            stored: BrowserSettings::default(),
            overrides: SessionOverrides::default(),
            effective: BrowserSettings::default(),
            writable: true,
        }
    }

    /// Sets the command-line overrides for this run. They change what
    /// `get_settings` returns but are never saved.
    pub fn set_overrides(&mut self, overrides: SessionOverrides) {
        self.overrides = overrides;
        self.refresh();
    }

    pub fn overrides(&self) -> SessionOverrides {
        self.overrides
    }

    /// The settings as they are (or will be) on disk, without overrides.
    pub fn stored_settings(&self) -> &BrowserSettings {
        &self.stored
    }

    /// False after a failed load; saves are refused until `reset`.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    fn refresh(&mut self) {
        self.effective = self.overrides.apply(&self.stored);
    }
}

/// Reads the settings file. A missing file is `Ok(None)`.
fn read_settings_file(path: &Path) -> Result<Option<BrowserSettings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SettingsError::IoError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };
    serde_json::from_str(&content).map(Some).map_err(|e| {
        SettingsError::SerializationError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// `appearance.dark_mode` -> `/appearance/dark_mode`.
fn key_to_pointer(key: &str) -> Result<String, SettingsError> {
    let valid = !key.is_empty()
        && !key.contains(['/', '~'])
        && key.split('.').all(|segment| !segment.is_empty());
    if !valid {
        return Err(SettingsError::InvalidKey(format!("'{}' is not a settings path", key)));
    }
    Ok(format!("/{}", key.replace('.', "/")))
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads the settings file; a missing file means defaults.
    ///
    /// On a read or parse error the browser runs on defaults and the file is
    /// marked read-only, so a later `set_value` cannot overwrite it.
    fn load(&mut self) -> Result<BrowserSettings, SettingsError> {
        match read_settings_file(Path::new(&self.config_path)) {
            Ok(found) => {
                if found.is_none() {
                    debug!("No settings file at {}, using defaults", self.config_path);
                }
                self.stored = found.unwrap_or_default();
                self.writable = true;
                self.refresh();
                Ok(self.effective.clone())
            }
            Err(e) => {
                self.stored = BrowserSettings::default();
                self.writable = false;
                self.refresh();
                Err(e)
            }
        }
    }

    /// Writes the file layer through a temporary file, creating parent
    /// directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        if !self.writable {
            return Err(SettingsError::ReadOnly(self.config_path.clone()));
        }

        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.stored)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)
            .and_then(|()| fs::rename(&staging, path))
            .map_err(|e| SettingsError::IoError(format!("Failed to write {}: {}", self.config_path, e)))
    }

    fn get_settings(&self) -> &BrowserSettings {
        &self.effective
    }

    /// Sets one value by dot-notation key, e.g. `"appearance.dark_mode"`,
    /// and saves. The key must already exist and the value must fit its type.
    ///
    /// An explicit change wins over a command-line override of the same key.
    /// When the file is read-only the change still applies for this run and
    /// `ReadOnly` is returned.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        let pointer = key_to_pointer(key)?;
        let mut tree = serde_json::to_value(&self.stored)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;

        let slot = tree
            .pointer_mut(&pointer)
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        *slot = value;

        self.stored = serde_json::from_value(tree).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        self.overrides.release(key);
        self.refresh();

        if let Err(e) = self.save() {
            warn!("Setting '{}' applies to this session only: {}", key, e);
            return Err(e);
        }
        Ok(())
    }

    /// Restores defaults and saves them, replacing even an unreadable file.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.stored = BrowserSettings::default();
        self.writable = true;
        self.refresh();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
