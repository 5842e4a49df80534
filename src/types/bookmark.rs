use serde::{Deserialize, Serialize};

/// A bookmarked page. Bookmarks live for the current session only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub url: String,
    pub added_at: i64,
}
