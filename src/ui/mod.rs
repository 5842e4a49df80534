//! Stark Browser UI layer.
//!
//! A single `wry` web view hosts every tab in turn:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The toolbar and tab strip are injected into each page as HTML/CSS/JS and
//! talk to the Rust side over wry IPC.

pub mod webview_app;
