//! Theme Engine: dark/light chrome palettes exposed as CSS variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Colour scheme of the browser chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn set_theme(&mut self, mode: ThemeMode);
    fn get_theme(&self) -> ThemeMode;
    fn toggle(&mut self) -> ThemeMode;
    fn is_dark(&self) -> bool;
    fn get_css_variables(&self) -> BTreeMap<String, String>;
}

struct Palette {
    window_bg: &'static str,
    pane_border: &'static str,
    toolbar_bg: &'static str,
    toolbar_border: &'static str,
    urlbar_bg: &'static str,
    urlbar_fg: &'static str,
    urlbar_border: &'static str,
    button_bg: &'static str,
    button_hover: &'static str,
    button_pressed: &'static str,
}

const DARK: Palette = Palette {
    window_bg: "#121212",
    pane_border: "#1c1c1c",
    toolbar_bg: "#1c1c1c",
    toolbar_border: "#333333",
    urlbar_bg: "#1f1f1f",
    urlbar_fg: "#FFFFFF",
    urlbar_border: "#444444",
    button_bg: "#3498db",
    button_hover: "#2980b9",
    button_pressed: "#1c6ea4",
};

const LIGHT: Palette = Palette {
    window_bg: "#FFFFFF",
    pane_border: "#d6d6d6",
    toolbar_bg: "#f2f2f2",
    toolbar_border: "#d6d6d6",
    urlbar_bg: "#FFFFFF",
    urlbar_fg: "#000000",
    urlbar_border: "#CCCCCC",
    button_bg: "#2980b9",
    button_hover: "#1c6ea4",
    button_pressed: "#1f4d7f",
};

const BUTTON_FG: &str = "#FFFFFF";

/// The theme engine implementation.
pub struct ThemeEngine {
    current_theme: ThemeMode,
}

impl ThemeEngine {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            current_theme: mode,
        }
    }

    fn palette(&self) -> &'static Palette {
        match self.current_theme {
            ThemeMode::Dark => &DARK,
            ThemeMode::Light => &LIGHT,
        }
    }

    /// The current variables as a single `:root{...}` rule.
    pub fn css_root_block(&self) -> String {
        let body: String = self
            .get_css_variables()
            .iter()
            .map(|(name, value)| format!("{}:{};", name, value))
            .collect();
        format!(":root{{{}}}", body)
    }
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new(ThemeMode::Dark)
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn set_theme(&mut self, mode: ThemeMode) {
        self.current_theme = mode;
    }

    fn get_theme(&self) -> ThemeMode {
        self.current_theme
    }

    fn toggle(&mut self) -> ThemeMode {
        self.current_theme = match self.current_theme {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        self.current_theme
    }

    fn is_dark(&self) -> bool {
        self.current_theme == ThemeMode::Dark
    }

    fn get_css_variables(&self) -> BTreeMap<String, String> {
        let p = self.palette();
        let mut vars = BTreeMap::new();
        vars.insert("--window-bg".into(), p.window_bg.into());
        vars.insert("--pane-border".into(), p.pane_border.into());
        vars.insert("--toolbar-bg".into(), p.toolbar_bg.into());
        vars.insert("--toolbar-border".into(), p.toolbar_border.into());
        vars.insert("--urlbar-bg".into(), p.urlbar_bg.into());
        vars.insert("--urlbar-fg".into(), p.urlbar_fg.into());
        vars.insert("--urlbar-border".into(), p.urlbar_border.into());
        vars.insert("--button-bg".into(), p.button_bg.into());
        vars.insert("--button-hover".into(), p.button_hover.into());
        vars.insert("--button-pressed".into(), p.button_pressed.into());
        vars.insert("--button-fg".into(), BUTTON_FG.into());
        vars
    }
}
