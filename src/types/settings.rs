use serde::{Deserialize, Serialize};

/// Page loaded by the first tab, the home button and new tabs.
pub const DEFAULT_HOMEPAGE: &str = "https://ambikeshishere.github.io/Landing-page/";

/// Search endpoint; the encoded query is appended verbatim.
pub const DEFAULT_SEARCH_URL: &str = "https://duckduckgo.com/?q=";

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BrowserSettings {
    pub general: GeneralSettings,
    pub appearance: AppearanceSettings,
    pub privacy: PrivacySettings,
    pub window: WindowSettings,
}

/// General browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    pub homepage: String,
    pub search_url: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

/// Appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceSettings {
    pub dark_mode: bool,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Ad blocking settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrivacySettings {
    pub ad_blocking: bool,
    /// Appended to the built-in ad domain list at startup.
    pub extra_ad_domains: Vec<String>,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            ad_blocking: true,
            extra_ad_domains: Vec::new(),
        }
    }
}

/// Main window geometry, in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Stark Browser".to_string(),
            x: 100.0,
            y: 100.0,
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Settings forced for one run from the command line.
///
/// Laid over the file-backed settings and never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOverrides {
    pub dark_mode: Option<bool>,
    pub ad_blocking: Option<bool>,
}

impl SessionOverrides {
    pub fn is_empty(&self) -> bool {
        self.dark_mode.is_none() && self.ad_blocking.is_none()
    }

    /// `settings` with every override applied.
    pub fn apply(&self, settings: &BrowserSettings) -> BrowserSettings {
        let mut merged = settings.clone();
        if let Some(dark) = self.dark_mode {
            merged.appearance.dark_mode = dark;
        }
        if let Some(enabled) = self.ad_blocking {
            merged.privacy.ad_blocking = enabled;
        }
        merged
    }

    /// Drops the override for a dot-notation key, if one is set.
    pub fn release(&mut self, key: &str) {
        match key {
            "appearance.dark_mode" | "appearance" => self.dark_mode = None,
            "privacy.ad_blocking" | "privacy" => self.ad_blocking = None,
            _ => {}
        }
    }
}
