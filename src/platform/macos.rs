// Stark Browser platform paths for macOS
// Config: ~/Library/Application Support/StarkBrowser

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for Stark Browser on macOS.
/// `~/Library/Application Support/StarkBrowser`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("StarkBrowser")
}
