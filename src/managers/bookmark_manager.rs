//! Bookmark Manager for Stark Browser.
//!
//! Keeps an ordered, duplicate-free list of bookmarked URLs for the current
//! session and renders it as the bookmarks page.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&mut self, url: &str) -> Result<(), BookmarkError>;
    fn remove_bookmark(&mut self, url: &str) -> Result<(), BookmarkError>;
    fn contains(&self, url: &str) -> bool;
    fn list_bookmarks(&self) -> &[Bookmark];
    fn count(&self) -> usize;
    fn render_html(&self) -> String;
}

/// Session-lived bookmark list.
pub struct BookmarkManager {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkManager {
    pub fn new() -> Self {
        Self {
            bookmarks: Vec::new(),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl Default for BookmarkManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl BookmarkManagerTrait for BookmarkManager {
    /// Appends a bookmark. URLs are compared exactly.
    fn add_bookmark(&mut self, url: &str) -> Result<(), BookmarkError> {
        if url.trim().is_empty() {
            return Err(BookmarkError::EmptyUrl);
        }
        if self.contains(url) {
            return Err(BookmarkError::DuplicateUrl(url.to_string()));
        }
        self.bookmarks.push(Bookmark {
            url: url.to_string(),
            added_at: Self::now(),
        });
        Ok(())
    }

    fn remove_bookmark(&mut self, url: &str) -> Result<(), BookmarkError> {
        let idx = self
            .bookmarks
            .iter()
            .position(|b| b.url == url)
            .ok_or_else(|| BookmarkError::NotFound(url.to_string()))?;
        self.bookmarks.remove(idx);
        Ok(())
    }

    fn contains(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    fn list_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn count(&self) -> usize {
        self.bookmarks.len()
    }

    /// Body markup for the bookmarks page, in insertion order.
    fn render_html(&self) -> String {
        if self.bookmarks.is_empty() {
            return "<h1>No bookmarks added</h1>".to_string();
        }
        let items: String = self
            .bookmarks
            .iter()
            .map(|b| {
                let url = escape_html(&b.url);
                format!("<li><a href=\"{}\">{}</a></li>", url, url)
            })
            .collect();
        format!("<h1>Bookmarks</h1><ul>{}</ul>", items)
    }
}
