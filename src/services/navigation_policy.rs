//! Navigation Policy for the shell.
//!
//! Every URL the embedded view is about to load is checked against the
//! configured origin with a plain prefix match. Matching URLs stay in the
//! view; everything else, whatever its scheme, is handed to the OS.

use log::debug;

use crate::types::config::ShellConfig;
use crate::types::navigation::{NavigationDecision, NewWindowAction};

/// Coarse classification of a URL leaving the shell, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalLinkKind {
    Telephone,
    Email,
    Messaging,
    Web,
    Other,
}

/// Trait defining navigation interception.
pub trait NavigationPolicyTrait {
    fn origin(&self) -> &str;
    fn is_same_origin(&self, url: &str) -> bool;
    fn decide(&self, url: &str) -> NavigationDecision;
    fn new_window_action(&self, url: &str) -> NewWindowAction;
}

/// Prefix-match policy over a single origin.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    origin: String,
}

impl NavigationPolicy {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            origin: config.origin_url().to_string(),
        }
    }

    /// Classifies a URL the shell is about to dispatch externally.
    pub fn classify_external(url: &str) -> ExternalLinkKind {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("tel:") {
            ExternalLinkKind::Telephone
        } else if lower.starts_with("mailto:") {
            ExternalLinkKind::Email
        } else if lower.starts_with("https://wa.me")
            || lower.starts_with("whatsapp:")
            || lower.starts_with("sms:")
        {
            ExternalLinkKind::Messaging
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            ExternalLinkKind::Web
        } else {
            ExternalLinkKind::Other
        }
    }
}

impl NavigationPolicyTrait for NavigationPolicy {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn is_same_origin(&self, url: &str) -> bool {
        url.starts_with(&self.origin)
    }

    fn decide(&self, url: &str) -> NavigationDecision {
        let decision = if self.is_same_origin(url) {
            NavigationDecision::Allow
        } else {
            NavigationDecision::DenyAndDispatch
        };
        debug!("Navigation to {} -> {:?}", url, decision);
        decision
    }

    fn new_window_action(&self, url: &str) -> NewWindowAction {
        if self.is_same_origin(url) {
            NewWindowAction::LoadInView(url.to_string())
        } else {
            NewWindowAction::Dispatch(url.to_string())
        }
    }
}
