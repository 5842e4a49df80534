// Stark Browser platform paths for Linux
// Config: ~/.config/stark-browser

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Stark Browser on Linux.
/// Uses `$XDG_CONFIG_HOME/stark-browser` if set, otherwise `~/.config/stark-browser`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("stark-browser")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("stark-browser")
    }
}
