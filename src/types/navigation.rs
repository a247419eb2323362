use serde::{Deserialize, Serialize};

/// Outcome of intercepting a prospective navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationDecision {
    /// Load the URL inside the embedded view.
    Allow,
    /// Keep the view where it is; the URL goes to the OS handler instead.
    DenyAndDispatch,
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

/// What to do with a request to open a second browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewWindowAction {
    /// Same-origin: load in the existing view.
    LoadInView(String),
    /// Anything else: hand to the OS.
    Dispatch(String),
}
