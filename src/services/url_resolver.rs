//! URL bar input classification.
//!
//! Decides whether typed text is an address or a search query and builds the
//! URL to load for it.

use url::form_urlencoded;

/// What the user typed into the URL bar, after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlInput {
    /// A loadable address, scheme included.
    Url(String),
    /// Free text to hand to the search engine.
    Search(String),
}

const PASSTHROUGH_PREFIXES: &[&str] = &["http://", "https://", "stark://", "about:"];

/// Classifies URL bar text. Returns `None` for blank input.
pub fn classify_input(text: &str) -> Option<UrlInput> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if PASSTHROUGH_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Some(UrlInput::Url(trimmed.to_string()));
    }

    if trimmed.contains('.') && !trimmed.chars().any(char::is_whitespace) {
        return Some(UrlInput::Url(format!("https://{}", trimmed)));
    }

    Some(UrlInput::Search(trimmed.to_string()))
}

/// Builds a search URL; spaces become `+`, everything else is percent-encoded.
pub fn search_url(query: &str, base: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{}{}", base, encoded)
}

/// The URL to load for URL bar text, or `None` when there is nothing to load.
pub fn resolve_input(text: &str, search_base: &str) -> Option<String> {
    match classify_input(text)? {
        UrlInput::Url(url) => Some(url),
        UrlInput::Search(query) => Some(search_url(&query, search_base)),
    }
}

/// Short label for a URL: its host without a leading `www.`.
pub fn display_title(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.trim_start_matches("www.").to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}
