//! Page-to-host message bridge.
//!
//! The page talks to the host through `window.ipc.postMessage` with small
//! JSON objects. Payloads come from untrusted page content, so they are
//! validated into a [`PageMessage`] before anything acts on them.

use serde_json::Value;

use crate::types::errors::MessageError;
use crate::types::message::{EventPayload, PageMessage};

const BRIDGE_JS: &str = include_str!("../../resources/bridge.js");

/// Parses a raw IPC payload.
///
/// Any object with a non-empty string `url` is a link to hand to the OS,
/// whatever else it carries. Otherwise a tagged payload (`{"event": ...}`)
/// maps to a page event. A link without a usable url is
/// [`MessageError::MissingUrl`].
pub fn parse_page_message(payload: &str) -> Result<PageMessage, MessageError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| MessageError::Malformed(e.to_string()))?;

    match value.get("url") {
        Some(Value::String(url)) if !url.is_empty() => {
            return Ok(PageMessage::OpenExternal(url.clone()));
        }
        Some(url) if value.get("event").is_none() => {
            return match url {
                Value::String(_) | Value::Null => Err(MessageError::MissingUrl),
                _ => Err(MessageError::Malformed("url is not a string".to_string())),
            };
        }
        _ => {}
    }

    if value.get("event").is_some() {
        let event: EventPayload =
            serde_json::from_value(value).map_err(|e| MessageError::Malformed(e.to_string()))?;
        return Ok(match event {
            EventPayload::Scroll { y } => PageMessage::Scroll(y),
            EventPayload::Pull => PageMessage::Pull,
            EventPayload::NavigationState { can_go_back } => {
                PageMessage::NavigationState { can_go_back }
            }
            EventPayload::Back => PageMessage::Back,
            EventPayload::Ready => PageMessage::Ready,
        });
    }

    Err(MessageError::Malformed("unrecognized message shape".to_string()))
}

/// Builds the script injected into every page of the origin.
///
/// `origin` and `tint_color` are embedded as JSON string literals so page
/// script sees them verbatim.
pub fn injected_script(origin: &str, tint_color: &str) -> String {
    BRIDGE_JS
        .replace("__WEBSHELL_ORIGIN__", &js_string(origin))
        .replace("__WEBSHELL_TINT__", &js_string(tint_color))
}

/// Script that updates the progress bar overlay.
pub fn progress_script(fraction: f64, visible: bool) -> String {
    format!(
        "if(window.__webshell_setProgress)window.__webshell_setProgress({:.4},{})",
        fraction, visible
    )
}

/// Script that hands scroll ownership to the page overlay: `outer` arms the
/// pull gesture, `inner` leaves the engine's native overscroll alone.
pub fn scroll_ownership_script(outer: bool, inner: bool) -> String {
    format!(
        "if(window.__webshell_setScrollOwnership)window.__webshell_setScrollOwnership({},{})",
        outer, inner
    )
}

fn js_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
