use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::types::errors::TabError;
use crate::types::tab::Tab;

/// Trait defining the tab management interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self, url: &str, title: &str, active: bool) -> String;
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn move_tab(&mut self, tab_id: &str, new_index: usize) -> Result<(), TabError>;
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn get_all_tabs(&self) -> Vec<&Tab>;
    fn get_active_tab(&self) -> Option<&Tab>;
    fn tab_count(&self) -> usize;
    fn get_tab_order(&self) -> &[String];
    fn record_navigation(&mut self, tab_id: &str, url: &str) -> Result<(), TabError>;
    fn replace_current_entry(&mut self, tab_id: &str, url: &str) -> Result<(), TabError>;
    fn go_back(&mut self, tab_id: &str) -> Result<Option<String>, TabError>;
    fn go_forward(&mut self, tab_id: &str) -> Result<Option<String>, TabError>;
    fn update_tab_title(&mut self, tab_id: &str, title: &str) -> Result<(), TabError>;
}

/// In-memory tab manager for the browser.
pub struct TabManager {
    tabs: Vec<Tab>,
    tab_order: Vec<String>,
    active_tab_id: Option<String>,
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            tab_order: Vec::new(),
            active_tab_id: None,
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn find_tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn find_order_index(&self, tab_id: &str) -> Option<usize> {
        self.tab_order.iter().position(|id| id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: &str) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    /// ID of the active tab, if any tab exists.
    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManagerTrait for TabManager {
    /// Create a new tab showing `url`. Returns the new tab's ID.
    ///
    /// The first tab ever created becomes active regardless of `active`.
    fn create_tab(&mut self, url: &str, title: &str, active: bool) -> String {
        let id = Uuid::new_v4().to_string();
        let tab = Tab {
            id: id.clone(),
            url: url.to_string(),
            title: title.to_string(),
            history: vec![url.to_string()],
            history_index: 0,
            created_at: Self::now(),
        };
        self.tabs.push(tab);
        self.tab_order.push(id.clone());
        if active || self.active_tab_id.is_none() {
            self.active_tab_id = Some(id.clone());
        }
        id
    }

    /// Close a tab. The last remaining tab cannot be closed.
    ///
    /// Closing the active tab activates the tab that slides into its slot,
    /// or the new last tab when the closed one was rightmost.
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        let tab_idx = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        let order_idx = self
            .find_order_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        if self.tabs.len() <= 1 {
            return Err(TabError::LastTab);
        }

        let need_switch = self.active_tab_id.as_deref() == Some(tab_id);

        self.tabs.remove(tab_idx);
        self.tab_order.remove(order_idx);

        if need_switch {
            let new_order_idx = order_idx.min(self.tab_order.len() - 1);
            self.active_tab_id = Some(self.tab_order[new_order_idx].clone());
        }

        Ok(())
    }

    fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        if self.find_tab_index(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        self.active_tab_id = Some(tab_id.to_string());
        Ok(())
    }

    /// Move a tab to a new position in the tab strip.
    fn move_tab(&mut self, tab_id: &str, new_index: usize) -> Result<(), TabError> {
        let order_idx = self
            .find_order_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        if new_index >= self.tab_order.len() {
            return Err(TabError::InvalidIndex(new_index));
        }

        let id = self.tab_order.remove(order_idx);
        self.tab_order.insert(new_index, id);
        Ok(())
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn get_all_tabs(&self) -> Vec<&Tab> {
        self.tab_order
            .iter()
            .filter_map(|id| self.tabs.iter().find(|t| t.id == *id))
            .collect()
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab_id
            .as_ref()
            .and_then(|id| self.tabs.iter().find(|t| t.id == *id))
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn get_tab_order(&self) -> &[String] {
        &self.tab_order
    }

    /// Record that the tab now shows `url`.
    ///
    /// Re-reporting the current history entry (a reload, or the page
    /// confirming a back/forward step) leaves history untouched. Anything
    /// else drops the forward entries and appends.
    fn record_navigation(&mut self, tab_id: &str, url: &str) -> Result<(), TabError> {
        let tab = self.tab_mut(tab_id)?;
        tab.url = url.to_string();
        if tab.history.get(tab.history_index).map(String::as_str) == Some(url) {
            return Ok(());
        }
        tab.history.truncate(tab.history_index + 1);
        tab.history.push(url.to_string());
        tab.history_index = tab.history.len() - 1;
        Ok(())
    }

    /// Overwrite the tab's current history entry, e.g. after a redirect.
    fn replace_current_entry(&mut self, tab_id: &str, url: &str) -> Result<(), TabError> {
        let tab = self.tab_mut(tab_id)?;
        tab.url = url.to_string();
        let idx = tab.history_index;
        if idx < tab.history.len() {
            tab.history[idx] = url.to_string();
        } else {
            tab.history.push(url.to_string());
            tab.history_index = tab.history.len() - 1;
        }
        Ok(())
    }

    /// Step back in the tab's history. Returns the URL to load, if any.
    fn go_back(&mut self, tab_id: &str) -> Result<Option<String>, TabError> {
        let tab = self.tab_mut(tab_id)?;
        if !tab.can_go_back() {
            return Ok(None);
        }
        tab.history_index -= 1;
        tab.url = tab.history[tab.history_index].clone();
        Ok(Some(tab.url.clone()))
    }

    /// Step forward in the tab's history. Returns the URL to load, if any.
    fn go_forward(&mut self, tab_id: &str) -> Result<Option<String>, TabError> {
        let tab = self.tab_mut(tab_id)?;
        if !tab.can_go_forward() {
            return Ok(None);
        }
        tab.history_index += 1;
        tab.url = tab.history[tab.history_index].clone();
        Ok(Some(tab.url.clone()))
    }

    fn update_tab_title(&mut self, tab_id: &str, title: &str) -> Result<(), TabError> {
        let tab = self.tab_mut(tab_id)?;
        tab.title = title.to_string();
        Ok(())
    }
}
