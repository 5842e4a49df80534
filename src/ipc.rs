//! IPC message handler for the injected browser chrome.
//!
//! The toolbar posts JSON messages of the form `{"cmd": "...", ...}` through
//! `window.ipc.postMessage`. `handle_message` decodes one message and
//! dispatches it to the `App`, returning the actions the web view must run.

use serde::Deserialize;
use tracing::debug;

use crate::app::App;
use crate::types::action::BrowserAction;
use crate::types::errors::IpcError;

/// Messages understood from the chrome.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum IpcMessage {
    /// The toolbar finished building on a freshly loaded document.
    UiReady {
        url: String,
        #[serde(default)]
        title: String,
    },
    /// The document's location or title changed.
    UrlChanged {
        url: String,
        #[serde(default)]
        title: String,
    },
    Navigate {
        input: String,
    },
    Back,
    Forward,
    Reload,
    Home,
    NewTab,
    CloseTab {
        id: String,
    },
    SwitchTab {
        id: String,
    },
    MoveTab {
        id: String,
        index: usize,
    },
    AddBookmark,
    RemoveBookmark {
        url: String,
    },
    ShowBookmarks,
    ToggleTheme,
    ToggleMusic,
    ToggleVideo,
    /// A subresource was refused by the page-side ad-block shim.
    Blocked {
        url: String,
    },
}

/// Parses a raw IPC payload.
pub fn parse_message(raw: &str) -> Result<IpcMessage, IpcError> {
    serde_json::from_str(raw).map_err(|e| IpcError::Malformed(e.to_string()))
}

/// Applies a decoded message to the browser state.
pub fn dispatch(app: &mut App, message: IpcMessage) -> Vec<BrowserAction> {
    match message {
        IpcMessage::UiReady { url, title } => {
            let mut actions = app.on_page_ready(&url, &title);
            actions.push(BrowserAction::Eval(app.media.apply_script()));
            actions
        }
        IpcMessage::UrlChanged { url, title } => app.on_url_changed(&url, &title),
        IpcMessage::Navigate { input } => app.navigate_to_input(&input),
        IpcMessage::Back => app.navigate_back(),
        IpcMessage::Forward => app.navigate_forward(),
        IpcMessage::Reload => app.reload_page(),
        IpcMessage::Home => app.go_home(),
        IpcMessage::NewTab => app.add_new_tab(None, None),
        IpcMessage::CloseTab { id } => app.close_tab(&id),
        IpcMessage::SwitchTab { id } => app.switch_tab(&id),
        IpcMessage::MoveTab { id, index } => app.move_tab(&id, index),
        IpcMessage::AddBookmark => app.add_to_bookmarks(),
        IpcMessage::RemoveBookmark { url } => app.remove_bookmark(&url),
        IpcMessage::ShowBookmarks => app.show_bookmarks(),
        IpcMessage::ToggleTheme => app.toggle_theme(),
        IpcMessage::ToggleMusic => {
            let mut actions = app.toggle_music();
            actions.push(BrowserAction::Eval(app.media.apply_script()));
            actions
        }
        IpcMessage::ToggleVideo => {
            let mut actions = app.toggle_video();
            actions.push(BrowserAction::Eval(app.media.apply_script()));
            actions
        }
        IpcMessage::Blocked { url } => app.record_blocked(&url),
    }
}

/// Decodes and dispatches one raw IPC payload.
pub fn handle_message(app: &mut App, raw: &str) -> Result<Vec<BrowserAction>, IpcError> {
    let message = parse_message(raw)?;
    debug!("IPC {:?}", message);
    Ok(dispatch(app, message))
}
