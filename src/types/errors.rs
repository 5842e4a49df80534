use std::fmt;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(String),
    /// The provided tab index is out of bounds.
    InvalidIndex(usize),
    /// The last remaining tab cannot be closed.
    LastTab,
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::InvalidIndex(index) => write!(f, "Invalid tab index: {}", index),
            TabError::LastTab => write!(f, "Cannot close the last tab"),
        }
    }
}

impl std::error::Error for TabError {}

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// No bookmark exists for the given URL.
    NotFound(String),
    /// A bookmark with the same URL already exists.
    DuplicateUrl(String),
    /// The URL to bookmark was blank.
    EmptyUrl,
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(url) => write!(f, "Bookmark not found: {}", url),
            BookmarkError::DuplicateUrl(url) => write!(f, "Duplicate bookmark URL: {}", url),
            BookmarkError::EmptyUrl => write!(f, "Cannot bookmark an empty URL"),
        }
    }
}

impl std::error::Error for BookmarkError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
    /// The settings file could not be read at startup, so it is left untouched.
    ReadOnly(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
            SettingsError::ReadOnly(path) => {
                write!(f, "Settings file left unchanged after failed load: {}", path)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === IpcError ===

/// Errors raised while decoding messages posted by the web view.
#[derive(Debug)]
pub enum IpcError {
    /// The message was not valid JSON or named an unknown command.
    Malformed(String),
}

impl fmt::Display for IpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcError::Malformed(msg) => write!(f, "Malformed IPC message: {}", msg),
        }
    }
}

impl std::error::Error for IpcError {}

// === BrowserError ===

/// Errors that prevent the browser window from starting.
#[derive(Debug)]
pub enum BrowserError {
    /// The native window could not be created.
    Window(String),
    /// The web view could not be created or attached.
    WebView(String),
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::Window(msg) => write!(f, "Window creation failed: {}", msg),
            BrowserError::WebView(msg) => write!(f, "WebView creation failed: {}", msg),
        }
    }
}

impl std::error::Error for BrowserError {}
