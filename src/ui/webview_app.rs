//! WebView-based browser window using `wry` + `tao`.
//!
//! - `with_initialization_script` injects the ad-block shim and the toolbar
//!   on every http/https document.
//! - Internal pages are served through the `stark://` custom protocol and
//!   carry the toolbar inline.
//! - Top-level navigations and popups go through the ad blocker before the
//!   web view follows them.
//! - IPC from JS reaches `ipc::handle_message`; the resulting actions are
//!   posted back to the event loop and executed there.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Icon, WindowBuilder};
use tracing::{debug, error, info, warn};
use wry::http::header::{HeaderValue, CONTENT_TYPE};
use wry::http::{Request, Response, StatusCode};
use wry::WebViewBuilder;

use crate::app::App;
use crate::chrome::{self, INTERNAL_SCHEME};
use crate::ipc;
use crate::types::action::BrowserAction;
use crate::types::errors::BrowserError;

#[derive(Debug)]
enum UserEvent {
    LoadUrl(String),
    EvalScript(String),
    /// A page asked for a new window; opened as a tab instead.
    OpenInNewTab(String),
}

impl From<BrowserAction> for UserEvent {
    fn from(action: BrowserAction) -> Self {
        match action {
            BrowserAction::Load(url) => UserEvent::LoadUrl(url),
            BrowserAction::Eval(js) => UserEvent::EvalScript(js),
        }
    }
}

type BrowserState = Arc<Mutex<App>>;

fn send_actions(proxy: &EventLoopProxy<UserEvent>, actions: Vec<BrowserAction>) {
    for action in actions {
        if proxy.send_event(action.into()).is_err() {
            warn!("Event loop closed, dropping browser action");
            return;
        }
    }
}

/// `stark://localhost/x` as the current platform's web view expects it.
fn platform_url(url: &str) -> String {
    if cfg!(any(target_os = "windows", target_os = "android")) {
        if let Some(rest) = url.strip_prefix("stark://localhost/") {
            return format!("http://stark.localhost/{}", rest);
        }
    }
    url.to_string()
}

fn html_response(status: StatusCode, html: String) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Owned(html.into_bytes()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

fn serve_internal(state: &BrowserState, request: &Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    let url = request.uri().to_string();
    let page = match state.lock() {
        Ok(app) => app.render_internal_page(&url),
        Err(e) => {
            error!("Browser state poisoned: {}", e);
            None
        }
    };
    match page {
        Some(html) => html_response(StatusCode::OK, html),
        None => {
            warn!("Unknown internal page: {}", url);
            html_response(
                StatusCode::NOT_FOUND,
                "<!DOCTYPE html><html><body><h1>Page not found</h1></body></html>".to_string(),
            )
        }
    }
}

/// Small round window icon in the default button colour.
fn create_window_icon() -> Option<Icon> {
    const SIZE: u32 = 32;
    let center = (SIZE as f32 - 1.0) / 2.0;
    let radius = SIZE as f32 / 2.0 - 1.0;
    let mut data = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= radius {
                let shade = 1.0 - 0.35 * (dist / radius);
                data.push((0x34 as f32 * shade) as u8);
                data.push((0x98 as f32 * shade) as u8);
                data.push((0xdb as f32 * shade) as u8);
                data.push(255);
            } else {
                data.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    Icon::from_rgba(data, SIZE, SIZE).ok()
}

/// Opens the browser window and runs the event loop until it is closed.
pub fn run(app: App) -> Result<(), BrowserError> {
    let window_settings = app.settings().window.clone();
    let init_script = chrome::initialization_script(&app.ad_blocker);
    let state: BrowserState = Arc::new(Mutex::new(app));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(window_settings.title.as_str())
        .with_position(LogicalPosition::new(window_settings.x, window_settings.y))
        .with_inner_size(LogicalSize::new(window_settings.width, window_settings.height))
        .with_window_icon(create_window_icon())
        .build(&event_loop)
        .map_err(|e| BrowserError::Window(e.to_string()))?;

    let protocol_state = state.clone();
    let ipc_state = state.clone();
    let nav_state = state.clone();
    let nw_state = state.clone();
    let ipc_proxy = proxy.clone();
    let nw_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol(INTERNAL_SCHEME.into(), move |_wv_id, request| {
            serve_internal(&protocol_state, &request)
        })
        .with_initialization_script(init_script)
        .with_ipc_handler(move |msg: Request<String>| {
            let body = msg.body();
            let actions = match ipc_state.lock() {
                Ok(mut app) => ipc::handle_message(&mut app, body),
                Err(e) => {
                    error!("Browser state poisoned: {}", e);
                    return;
                }
            };
            match actions {
                Ok(actions) => send_actions(&ipc_proxy, actions),
                Err(e) => warn!("{}", e),
            }
        })
        .with_navigation_handler(move |url: String| match nav_state.lock() {
            Ok(mut app) => app.allow_navigation(&url),
            Err(_) => true,
        })
        .with_new_window_req_handler(move |url, _features| {
            debug!("New window requested: {}", url);
            let allowed = (url.starts_with("http://") || url.starts_with("https://"))
                && nw_state
                    .lock()
                    .map(|mut app| app.allow_navigation(&url))
                    .unwrap_or(false);
            if allowed {
                let _ = nw_proxy.send_event(UserEvent::OpenInNewTab(url));
            }
            wry::NewWindowResponse::Deny
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| BrowserError::WebView("GTK container unavailable".to_string()))?;
        builder
            .build_gtk(vbox)
            .map_err(|e| BrowserError::WebView(e.to_string()))?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder
        .build(&window)
        .map_err(|e| BrowserError::WebView(e.to_string()))?;

    let startup = match state.lock() {
        Ok(mut app) => app.startup_actions(),
        Err(e) => return Err(BrowserError::WebView(e.to_string())),
    };
    send_actions(&proxy, startup);
    info!("Browser window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Ok(app) = state.lock() {
                    info!(
                        blocked = app.ad_blocker.blocked_count(),
                        "Shutting down"
                    );
                }
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::LoadUrl(url) => {
                    debug!("Loading {}", url);
                    if let Err(e) = webview.load_url(&platform_url(&url)) {
                        warn!("Failed to load {}: {}", url, e);
                    }
                }
                UserEvent::EvalScript(js) => {
                    if let Err(e) = webview.evaluate_script(&js) {
                        warn!("Script evaluation failed: {}", e);
                    }
                }
                UserEvent::OpenInNewTab(url) => {
                    let actions = match state.lock() {
                        Ok(mut app) => app.add_new_tab(Some(&url), None),
                        Err(_) => Vec::new(),
                    };
                    send_actions(&proxy, actions);
                }
            },

            _ => {}
        }
    });
}
