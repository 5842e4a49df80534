//! Unit tests for the IPC handler: every chrome command dispatched by
//! `handle_message`, through the same code path the web view uses.

use serde_json::json;
use tempfile::TempDir;

use stark_browser::app::App;
use stark_browser::chrome::BOOKMARKS_URL;
use stark_browser::ipc::{handle_message, parse_message, IpcMessage};
use stark_browser::managers::bookmark_manager::BookmarkManagerTrait;
use stark_browser::managers::tab_manager::TabManagerTrait;
use stark_browser::services::settings_engine::SettingsEngine;
use stark_browser::services::theme_engine::ThemeEngineTrait;
use stark_browser::types::action::BrowserAction;
use stark_browser::types::errors::IpcError;
use stark_browser::types::settings::DEFAULT_HOMEPAGE;

fn setup() -> (App, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("settings.json").to_string_lossy().to_string();
    (App::new(SettingsEngine::new(Some(path))), tmp)
}

fn send(app: &mut App, msg: serde_json::Value) -> Vec<BrowserAction> {
    handle_message(app, &msg.to_string()).unwrap()
}

fn first_load(actions: &[BrowserAction]) -> Option<&str> {
    actions.iter().find_map(|a| match a {
        BrowserAction::Load(url) => Some(url.as_str()),
        BrowserAction::Eval(_) => None,
    })
}

// ─── Decoding ───

#[test]
fn test_parse_commands() {
    assert_eq!(parse_message(r#"{"cmd":"back"}"#).unwrap(), IpcMessage::Back);
    assert_eq!(
        parse_message(r#"{"cmd":"move_tab","id":"t1","index":2}"#).unwrap(),
        IpcMessage::MoveTab { id: "t1".to_string(), index: 2 }
    );
    assert_eq!(
        parse_message(r#"{"cmd":"url_changed","url":"https://a.example/"}"#).unwrap(),
        IpcMessage::UrlChanged { url: "https://a.example/".to_string(), title: String::new() }
    );
}

#[test]
fn test_malformed_messages_are_rejected() {
    let (mut app, _tmp) = setup();
    for raw in [
        "not json",
        r#"{"url":"https://a.example/"}"#,
        r#"{"cmd":"launch_rockets"}"#,
        r#"{"cmd":"navigate"}"#,
        r#"{"cmd":"move_tab","id":"t1","index":-1}"#,
    ] {
        let result = handle_message(&mut app, raw);
        assert!(matches!(result, Err(IpcError::Malformed(_))), "accepted {}", raw);
    }
}

// ─── Navigation ───

#[test]
fn test_navigate() {
    let (mut app, _tmp) = setup();
    let actions = send(&mut app, json!({"cmd": "navigate", "input": "example.com"}));
    assert_eq!(first_load(&actions), Some("https://example.com"));
}

#[test]
fn test_back_forward_home_reload() {
    let (mut app, _tmp) = setup();
    send(&mut app, json!({"cmd": "navigate", "input": "a.example"}));

    let back = send(&mut app, json!({"cmd": "back"}));
    assert_eq!(first_load(&back), Some(DEFAULT_HOMEPAGE));

    let forward = send(&mut app, json!({"cmd": "forward"}));
    assert_eq!(first_load(&forward), Some("https://a.example"));

    let home = send(&mut app, json!({"cmd": "home"}));
    assert_eq!(first_load(&home), Some(DEFAULT_HOMEPAGE));

    let reload = send(&mut app, json!({"cmd": "reload"}));
    assert_eq!(reload, vec![BrowserAction::Eval("location.reload()".to_string())]);
}

#[test]
fn test_ui_ready_sends_state_and_media_flags() {
    let (mut app, _tmp) = setup();
    let actions = send(
        &mut app,
        json!({"cmd": "ui_ready", "url": DEFAULT_HOMEPAGE, "title": "Landing"}),
    );
    assert_eq!(actions.len(), 2);
    assert!(matches!(&actions[0], BrowserAction::Eval(js) if js.contains("__stark_update")));
    assert!(matches!(&actions[1], BrowserAction::Eval(js) if js.contains("__stark_applyMedia(true,true)")));
    assert_eq!(app.tab_manager.get_active_tab().unwrap().title, "Landing");
}

// ─── Tabs ───

#[test]
fn test_tab_commands() {
    let (mut app, _tmp) = setup();
    let first = app.tab_manager.active_tab_id().unwrap().to_string();

    let actions = send(&mut app, json!({"cmd": "new_tab"}));
    assert_eq!(first_load(&actions), Some(DEFAULT_HOMEPAGE));
    let second = app.tab_manager.active_tab_id().unwrap().to_string();
    assert_ne!(first, second);

    send(&mut app, json!({"cmd": "move_tab", "id": &second, "index": 0}));
    assert_eq!(app.tab_manager.get_tab_order()[0], second);

    send(&mut app, json!({"cmd": "switch_tab", "id": &first}));
    assert_eq!(app.tab_manager.active_tab_id(), Some(first.as_str()));

    send(&mut app, json!({"cmd": "close_tab", "id": &second}));
    assert_eq!(app.tab_manager.tab_count(), 1);

    // The remaining tab stays open.
    let actions = send(&mut app, json!({"cmd": "close_tab", "id": &first}));
    assert!(actions.is_empty());
    assert_eq!(app.tab_manager.tab_count(), 1);
}

#[test]
fn test_switch_tab_ignores_report_from_outgoing_page() {
    let (mut app, _tmp) = setup();
    let first = app.tab_manager.active_tab_id().unwrap().to_string();
    send(&mut app, json!({"cmd": "navigate", "input": "a.example"}));
    send(&mut app, json!({"cmd": "ui_ready", "url": "https://a.example/", "title": "A"}));

    send(&mut app, json!({"cmd": "new_tab"}));
    send(&mut app, json!({"cmd": "ui_ready", "url": DEFAULT_HOMEPAGE, "title": "Home"}));

    send(&mut app, json!({"cmd": "switch_tab", "id": &first}));
    let late = send(&mut app, json!({"cmd": "url_changed", "url": DEFAULT_HOMEPAGE, "title": "Home"}));
    assert!(late.is_empty());
    assert_eq!(app.current_url(), Some("https://a.example/"));
    assert_eq!(app.tab_manager.get_active_tab().unwrap().title, "A");
}

// ─── Bookmarks ───

#[test]
fn test_bookmark_commands() {
    let (mut app, _tmp) = setup();
    send(&mut app, json!({"cmd": "navigate", "input": "example.com"}));
    send(&mut app, json!({"cmd": "add_bookmark"}));
    assert!(app.bookmark_manager.contains("https://example.com"));

    let actions = send(&mut app, json!({"cmd": "show_bookmarks"}));
    assert_eq!(first_load(&actions), Some(BOOKMARKS_URL));

    send(&mut app, json!({"cmd": "remove_bookmark", "url": "https://example.com"}));
    assert_eq!(app.bookmark_manager.count(), 0);
}

// ─── Settings menu ───

#[test]
fn test_toggle_commands() {
    let (mut app, _tmp) = setup();
    send(&mut app, json!({"cmd": "toggle_theme"}));
    assert!(!app.theme_engine.is_dark());

    let actions = send(&mut app, json!({"cmd": "toggle_music"}));
    assert!(!app.media.music_enabled());
    assert!(matches!(actions.last(), Some(BrowserAction::Eval(js)) if js.contains("__stark_applyMedia(false,true)")));

    let actions = send(&mut app, json!({"cmd": "toggle_video"}));
    assert!(!app.media.video_enabled());
    assert!(matches!(actions.last(), Some(BrowserAction::Eval(js)) if js.contains("__stark_applyMedia(false,false)")));
}

// ─── Ad blocking ───

#[test]
fn test_blocked_reports_are_counted() {
    let (mut app, _tmp) = setup();
    let actions = send(&mut app, json!({"cmd": "blocked", "url": "https://cdn.taboola.com/loader.js"}));
    assert!(actions.is_empty());
    assert_eq!(app.ad_blocker.blocked_count(), 1);

    send(&mut app, json!({"cmd": "blocked", "url": "https://example.com/app.js"}));
    assert_eq!(app.ad_blocker.blocked_count(), 1);
}
