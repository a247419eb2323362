use serde::Deserialize;

/// A validated message from page script to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageMessage {
    /// `{"url": "..."}`: open the URL with the OS handler.
    OpenExternal(String),
    /// The page scrolled to a vertical offset.
    Scroll(f64),
    /// The user pulled down while the page was at the top.
    Pull,
    /// History availability changed.
    NavigationState { can_go_back: bool },
    /// The platform back key was pressed inside the page.
    Back,
    /// A new document finished parsing (`DOMContentLoaded`).
    Ready,
}

/// Tagged event payloads posted by the injected script.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub(crate) enum EventPayload {
    Scroll { y: f64 },
    Pull,
    NavigationState {
        #[serde(rename = "canGoBack")]
        can_go_back: bool,
    },
    Back,
    Ready,
}
