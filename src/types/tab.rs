use serde::{Deserialize, Serialize};

/// Represents a browser tab with its current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Every URL this tab has shown, oldest first.
    pub history: Vec<String>,
    /// Position of `url` inside `history`.
    pub history_index: usize,
    pub created_at: i64,
}

impl Tab {
    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }
}
