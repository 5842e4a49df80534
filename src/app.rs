//! App Core for Stark Browser.
//!
//! Central struct holding the browser state. Every user action is a method
//! returning the [`BrowserAction`]s the web view has to perform, so the whole
//! browser can be driven without a window.

use serde_json::json;
use tracing::{debug, info, warn};

use crate::chrome::{self, BOOKMARKS_URL};
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::ad_blocker::{AdBlocker, RequestDecision};
use crate::services::media::MediaToggles;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::theme_engine::{ThemeEngine, ThemeEngineTrait, ThemeMode};
use crate::services::url_resolver;
use crate::types::action::BrowserAction;
use crate::types::errors::{BookmarkError, TabError};
use crate::types::settings::BrowserSettings;

/// Central application struct holding all managers and services.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub tab_manager: TabManager,
    pub bookmark_manager: BookmarkManager,
    pub theme_engine: ThemeEngine,
    pub media: MediaToggles,
    pub ad_blocker: AdBlocker,
    pending: Option<PendingLoad>,
}

/// A load requested for a tab that the new document has not confirmed yet.
///
/// All tabs share one web view, so until then location reports may still
/// come from the page being replaced.
#[derive(Debug, Clone)]
struct PendingLoad {
    tab_id: String,
    url: String,
}

impl App {
    /// Creates the browser state from loaded settings, with a single `Home` tab.
    pub fn new(settings_engine: SettingsEngine) -> Self {
        let settings = settings_engine.get_settings().clone();

        let mut ad_blocker =
            AdBlocker::with_default_domains().with_extra_domains(&settings.privacy.extra_ad_domains);
        ad_blocker.set_enabled(settings.privacy.ad_blocking);

        let theme_engine = ThemeEngine::new(ThemeMode::from_dark_flag(settings.appearance.dark_mode));

        let mut tab_manager = TabManager::new();
        tab_manager.create_tab(&settings.general.homepage, "Home", true);

        info!(
            ad_domains = ad_blocker.domains().len(),
            ad_blocking = ad_blocker.is_enabled(),
            dark_mode = settings.appearance.dark_mode,
            "Browser state initialized"
        );

        Self {
            settings_engine,
            tab_manager,
            bookmark_manager: BookmarkManager::new(),
            theme_engine,
            media: MediaToggles::new(),
            ad_blocker,
            pending: None,
        }
    }

    pub fn settings(&self) -> &BrowserSettings {
        self.settings_engine.get_settings()
    }

    fn homepage(&self) -> String {
        self.settings().general.homepage.clone()
    }

    fn active_id(&self) -> Option<String> {
        self.tab_manager.active_tab_id().map(str::to_string)
    }

    /// URL of the active tab.
    pub fn current_url(&self) -> Option<&str> {
        self.tab_manager.get_active_tab().map(|t| t.url.as_str())
    }

    fn title_for(url: &str) -> String {
        match chrome::internal_title(url) {
            Some(title) => title.to_string(),
            None => url_resolver::display_title(url),
        }
    }

    fn chrome_update(&self) -> Vec<BrowserAction> {
        vec![BrowserAction::Eval(self.chrome_state_script())]
    }

    fn toast(text: &str) -> BrowserAction {
        let arg = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        BrowserAction::Eval(format!(
            "if(window.__stark_showToast)window.__stark_showToast({})",
            arg
        ))
    }

    /// Reloads whatever the active tab currently points at.
    fn load_active_tab(&mut self) -> Vec<BrowserAction> {
        let Some(tab) = self.tab_manager.get_active_tab() else {
            return Vec::new();
        };
        let pending = PendingLoad {
            tab_id: tab.id.clone(),
            url: tab.url.clone(),
        };
        let action = BrowserAction::Load(pending.url.clone());
        self.pending = Some(pending);
        vec![action]
    }

    /// Points the active tab at `url` and loads it, unless it is an ad.
    fn load_in_active_tab(&mut self, url: String) -> Vec<BrowserAction> {
        if !chrome::is_internal_url(&url) && self.ad_blocker.intercept(&url) == RequestDecision::Block {
            return vec![Self::toast("Blocked ad request")];
        }
        let Some(id) = self.active_id() else {
            return Vec::new();
        };
        if let Err(e) = self.tab_manager.record_navigation(&id, &url) {
            warn!("Failed to record navigation: {}", e);
            return Vec::new();
        }
        if let Err(e) = self.tab_manager.update_tab_title(&id, &Self::title_for(&url)) {
            warn!("Failed to update tab title: {}", e);
        }
        self.pending = Some(PendingLoad {
            tab_id: id,
            url: url.clone(),
        });
        vec![BrowserAction::Load(url)]
    }

    /// First load after the window opens.
    pub fn startup_actions(&mut self) -> Vec<BrowserAction> {
        self.load_active_tab()
    }

    /// Points the first tab at command-line input before the window opens.
    ///
    /// Returns false, with a warning, when the input was blocked or blank and
    /// the tab stays on the homepage.
    pub fn open_startup_input(&mut self, text: &str) -> bool {
        let blocked_before = self.ad_blocker.blocked_count();
        let opened = self
            .navigate_to_input(text)
            .iter()
            .any(|a| matches!(a, BrowserAction::Load(_)));
        if !opened {
            if self.ad_blocker.blocked_count() > blocked_before {
                warn!("Blocked ad request: {}; opening the homepage", text.trim());
            } else {
                warn!("Nothing to open for {:?}; opening the homepage", text);
            }
        }
        opened
    }

    /// Handles Enter in the URL bar.
    pub fn navigate_to_input(&mut self, text: &str) -> Vec<BrowserAction> {
        let search_base = self.settings().general.search_url.clone();
        match url_resolver::resolve_input(text, &search_base) {
            Some(url) => {
                debug!("URL bar input {:?} resolved to {}", text, url);
                self.load_in_active_tab(url)
            }
            None => Vec::new(),
        }
    }

    pub fn navigate_back(&mut self) -> Vec<BrowserAction> {
        let Some(id) = self.active_id() else {
            return Vec::new();
        };
        match self.tab_manager.go_back(&id) {
            Ok(Some(_)) => self.load_active_tab(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Back failed: {}", e);
                Vec::new()
            }
        }
    }

    pub fn navigate_forward(&mut self) -> Vec<BrowserAction> {
        let Some(id) = self.active_id() else {
            return Vec::new();
        };
        match self.tab_manager.go_forward(&id) {
            Ok(Some(_)) => self.load_active_tab(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Forward failed: {}", e);
                Vec::new()
            }
        }
    }

    pub fn reload_page(&mut self) -> Vec<BrowserAction> {
        if self.tab_manager.get_active_tab().is_none() {
            return Vec::new();
        }
        vec![BrowserAction::Eval("location.reload()".to_string())]
    }

    pub fn go_home(&mut self) -> Vec<BrowserAction> {
        let homepage = self.homepage();
        self.load_in_active_tab(homepage)
    }

    /// Opens a tab (homepage and "New Tab" by default) and switches to it.
    pub fn add_new_tab(&mut self, url: Option<&str>, label: Option<&str>) -> Vec<BrowserAction> {
        let url = url.map(str::to_string).unwrap_or_else(|| self.homepage());
        let label = label.unwrap_or("New Tab");
        let id = self.tab_manager.create_tab(&url, label, true);
        debug!("Opened tab {} at {}", id, url);
        self.load_active_tab()
    }

    /// Closes a tab; the last tab stays open.
    pub fn close_tab(&mut self, tab_id: &str) -> Vec<BrowserAction> {
        let was_active = self.tab_manager.active_tab_id() == Some(tab_id);
        match self.tab_manager.close_tab(tab_id) {
            Ok(()) if was_active => self.load_active_tab(),
            Ok(()) => self.chrome_update(),
            Err(TabError::LastTab) => {
                debug!("Ignoring close of the last tab");
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to close tab: {}", e);
                Vec::new()
            }
        }
    }

    pub fn switch_tab(&mut self, tab_id: &str) -> Vec<BrowserAction> {
        if self.tab_manager.active_tab_id() == Some(tab_id) {
            return self.chrome_update();
        }
        match self.tab_manager.switch_tab(tab_id) {
            Ok(()) => self.load_active_tab(),
            Err(e) => {
                warn!("Failed to switch tab: {}", e);
                Vec::new()
            }
        }
    }

    pub fn move_tab(&mut self, tab_id: &str, index: usize) -> Vec<BrowserAction> {
        match self.tab_manager.move_tab(tab_id, index) {
            Ok(()) => self.chrome_update(),
            Err(e) => {
                warn!("Failed to move tab: {}", e);
                Vec::new()
            }
        }
    }

    /// A newly loaded document reported its location. This settles the
    /// pending load, even when the server redirected elsewhere.
    pub fn on_page_ready(&mut self, url: &str, title: &str) -> Vec<BrowserAction> {
        self.on_location(url, title, true)
    }

    /// The displayed page reported a location change (load event, history
    /// API or hash change). Keeps the active tab and the URL bar in sync.
    pub fn on_url_changed(&mut self, url: &str, title: &str) -> Vec<BrowserAction> {
        self.on_location(url, title, false)
    }

    fn on_location(&mut self, url: &str, title: &str, new_document: bool) -> Vec<BrowserAction> {
        let url = chrome::normalize_internal_url(url);
        if url.starts_with("about:") || url.starts_with("data:") {
            return self.chrome_update();
        }
        let Some(id) = self.active_id() else {
            return Vec::new();
        };

        // Until the requested document reports, only a report of the
        // requested URL itself can be trusted.
        let settles = match self.pending.as_ref() {
            Some(pending) if pending.tab_id == id => {
                if !new_document && pending.url != url {
                    debug!("Ignoring {} reported while {} is loading", url, pending.url);
                    return Vec::new();
                }
                true
            }
            _ => false,
        };

        let result = if settles {
            self.pending = None;
            self.tab_manager.replace_current_entry(&id, &url)
        } else {
            self.tab_manager.record_navigation(&id, &url)
        };
        if let Err(e) = result {
            warn!("Failed to record navigation: {}", e);
        }

        let title = title.trim();
        let label = if title.is_empty() {
            Self::title_for(&url)
        } else {
            title.to_string()
        };
        if let Err(e) = self.tab_manager.update_tab_title(&id, &label) {
            warn!("Failed to update tab title: {}", e);
        }

        self.chrome_update()
    }

    /// Ad-block decision for a top-level navigation.
    pub fn allow_navigation(&mut self, url: &str) -> bool {
        if chrome::is_internal_url(url) || url.starts_with("about:") || url.starts_with("data:") {
            return true;
        }
        self.ad_blocker.intercept(url) == RequestDecision::Allow
    }

    /// Counts a subresource the page shim blocked.
    pub fn record_blocked(&mut self, url: &str) -> Vec<BrowserAction> {
        self.ad_blocker.record_blocked(url);
        Vec::new()
    }

    /// Bookmarks the active tab's page.
    pub fn add_to_bookmarks(&mut self) -> Vec<BrowserAction> {
        let Some(url) = self.current_url().map(str::to_string) else {
            return Vec::new();
        };
        if chrome::is_internal_url(&url) {
            return vec![Self::toast("Internal pages cannot be bookmarked")];
        }
        match self.bookmark_manager.add_bookmark(&url) {
            Ok(()) => {
                info!("Added to bookmarks: {}", url);
                let mut actions = vec![Self::toast("Bookmark added")];
                actions.extend(self.chrome_update());
                actions
            }
            Err(BookmarkError::DuplicateUrl(_)) => vec![Self::toast("Already bookmarked")],
            Err(e) => {
                warn!("Failed to add bookmark: {}", e);
                Vec::new()
            }
        }
    }

    pub fn remove_bookmark(&mut self, url: &str) -> Vec<BrowserAction> {
        match self.bookmark_manager.remove_bookmark(url) {
            Ok(()) => {
                info!("Removed from bookmarks: {}", url);
                if self.current_url() == Some(BOOKMARKS_URL) {
                    self.load_active_tab()
                } else {
                    self.chrome_update()
                }
            }
            Err(e) => {
                warn!("Failed to remove bookmark: {}", e);
                Vec::new()
            }
        }
    }

    /// Shows the bookmarks page in the active tab.
    pub fn show_bookmarks(&mut self) -> Vec<BrowserAction> {
        self.load_in_active_tab(BOOKMARKS_URL.to_string())
    }

    pub fn bookmarks_page_html(&self) -> String {
        chrome::bookmarks_page(&self.bookmark_manager, &self.theme_engine)
    }

    /// HTML served for an internal `stark://` URL.
    pub fn render_internal_page(&self, url: &str) -> Option<String> {
        chrome::render_internal(url, &self.bookmark_manager, &self.theme_engine)
    }

    /// Switches between dark and light chrome and remembers the choice.
    pub fn toggle_theme(&mut self) -> Vec<BrowserAction> {
        let mode = self.theme_engine.toggle();
        info!("Theme set to {:?}", mode);
        if let Err(e) = self
            .settings_engine
            .set_value("appearance.dark_mode", json!(mode == ThemeMode::Dark))
        {
            warn!("Failed to persist theme: {}", e);
        }
        self.chrome_update()
    }

    pub fn toggle_music(&mut self) -> Vec<BrowserAction> {
        self.media.toggle_music();
        self.chrome_update()
    }

    pub fn toggle_video(&mut self) -> Vec<BrowserAction> {
        self.media.toggle_video();
        self.chrome_update()
    }

    /// Script pushing the full chrome state to the toolbar.
    pub fn chrome_state_script(&self) -> String {
        let tabs: Vec<serde_json::Value> = self
            .tab_manager
            .get_all_tabs()
            .iter()
            .map(|t| json!({"id": t.id, "title": t.title, "url": t.url}))
            .collect();
        let active = self.tab_manager.get_active_tab();
        let url = active.map(|t| t.url.clone()).unwrap_or_default();
        let state = json!({
            "tabs": tabs,
            "activeId": active.map(|t| t.id.clone()).unwrap_or_default(),
            "url": url,
            "canGoBack": active.map(|t| t.can_go_back()).unwrap_or(false),
            "canGoForward": active.map(|t| t.can_go_forward()).unwrap_or(false),
            "bookmarked": self.bookmark_manager.contains(&url),
            "dark": self.theme_engine.is_dark(),
            "theme": self.theme_engine.get_css_variables(),
            "music": self.media.music_enabled(),
            "video": self.media.video_enabled(),
            "blocked": self.ad_blocker.blocked_count(),
        });
        format!("if(window.__stark_update)window.__stark_update({})", state)
    }
}
