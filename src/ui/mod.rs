//! Shell UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The remote site is the whole UI; the shell only adds a progress overlay
//! and talks to the page over wry IPC.

pub mod webview_app;
