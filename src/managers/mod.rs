// Stark Browser state managers
// Managers handle stateful operations: tabs and bookmarks.

pub mod bookmark_manager;
pub mod tab_manager;
