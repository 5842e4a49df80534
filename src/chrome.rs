//! Browser chrome assets: the toolbar injected into every page and the
//! internal `stark://` pages.
//!
//! The toolbar, tab strip and settings menu are HTML/CSS/JS running inside
//! the web view and talk to Rust over IPC (see [`crate::ipc`]).

use crate::managers::bookmark_manager::{escape_html, BookmarkManager, BookmarkManagerTrait};
use crate::services::ad_blocker::AdBlocker;
use crate::services::theme_engine::ThemeEngine;

const TOOLBAR_JS: &str = include_str!("../resources/ui/toolbar.js");
const TOOLBAR_CSS: &str = include_str!("../resources/ui/toolbar.css");
const PAGE_CSS: &str = include_str!("../resources/ui/page.css");
const TOOLBAR_CSS_PLACEHOLDER: &str = "__STARK_TOOLBAR_CSS__";

/// Scheme registered as a custom protocol for internal pages.
pub const INTERNAL_SCHEME: &str = "stark";

/// The bookmarks page.
pub const BOOKMARKS_URL: &str = "stark://localhost/bookmarks";

/// WebView2 and Android expose custom protocols under this origin instead.
const INTERNAL_HTTP_ORIGINS: &[&str] = &["http://stark.localhost/", "https://stark.localhost/"];

/// Maps the platform spelling of an internal URL back to `stark://localhost/...`.
pub fn normalize_internal_url(url: &str) -> String {
    for origin in INTERNAL_HTTP_ORIGINS {
        if let Some(path) = url.strip_prefix(origin) {
            return format!("stark://localhost/{}", path);
        }
    }
    url.to_string()
}

pub fn is_internal_url(url: &str) -> bool {
    normalize_internal_url(url).starts_with("stark://")
}

/// Tab label for internal pages.
pub fn internal_title(url: &str) -> Option<&'static str> {
    match normalize_internal_url(url).as_str() {
        BOOKMARKS_URL => Some("Bookmarks"),
        _ => None,
    }
}

/// The toolbar script with its stylesheet embedded.
pub fn toolbar_script() -> String {
    let css = serde_json::to_string(TOOLBAR_CSS).unwrap_or_else(|_| "\"\"".to_string());
    TOOLBAR_JS.replace(TOOLBAR_CSS_PLACEHOLDER, &css)
}

/// Script installed on every document: ad-block shim first, then the toolbar.
pub fn initialization_script(ad_blocker: &AdBlocker) -> String {
    let shim = ad_blocker.shim_script();
    let toolbar = toolbar_script();
    let mut script = String::with_capacity(shim.len() + toolbar.len() + 1);
    script.push_str(&shim);
    script.push('\n');
    script.push_str(&toolbar);
    script
}

/// Build HTML for an internal page.
///
/// The toolbar is inlined because initialization scripts do not run on
/// custom-protocol pages under WebView2.
pub fn internal_page(title: &str, body: &str, theme: &ThemeEngine, extra_js: &str) -> String {
    let toolbar = toolbar_script();
    let root_vars = theme.css_root_block();
    let mut html = String::with_capacity(
        body.len() + extra_js.len() + toolbar.len() + PAGE_CSS.len() + root_vars.len() + 256,
    );
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>");
    html.push_str(&escape_html(title));
    html.push_str("</title><style>");
    html.push_str(&root_vars);
    html.push_str(PAGE_CSS);
    html.push_str("</style></head><body>");
    html.push_str(body);
    html.push_str("<script>");
    html.push_str(&toolbar);
    html.push_str("</script>");
    if !extra_js.is_empty() {
        html.push_str("<script>");
        html.push_str(extra_js);
        html.push_str("</script>");
    }
    html.push_str("</body></html>");
    html
}

/// The bookmarks page, with a remove control next to each entry.
pub fn bookmarks_page(bookmarks: &BookmarkManager, theme: &ThemeEngine) -> String {
    let body = format!("<main class=\"bookmarks\">{}</main>", bookmarks.render_html());
    let js = r#"
document.querySelectorAll('.bookmarks li a').forEach(function(a){
  var b=document.createElement('button');
  b.className='remove';b.textContent='✕';b.title='Remove bookmark';
  b.addEventListener('click',function(e){
    e.preventDefault();
    if(window.__stark_ipc)window.__stark_ipc('remove_bookmark',{url:a.getAttribute('href')});
  });
  a.parentNode.appendChild(b);
});
"#;
    internal_page("Bookmarks", &body, theme, js)
}

/// HTML for an internal URL, or `None` if the path is unknown.
pub fn render_internal(url: &str, bookmarks: &BookmarkManager, theme: &ThemeEngine) -> Option<String> {
    match normalize_internal_url(url).as_str() {
        BOOKMARKS_URL => Some(bookmarks_page(bookmarks, theme)),
        _ => None,
    }
}
