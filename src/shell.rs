//! Embedded Browser Shell.
//!
//! Owns all per-screen state (load progress, back availability, scroll
//! anchor, refresh state) and mediates between the embedded browser's
//! events, the host navigation stack and OS link dispatch. The browser, the
//! host and the OS are reached only through the collaborator traits below.
//!
//! All handlers run on the UI thread, one at a time.

use std::time::Instant;

use log::{debug, info, warn};

use crate::managers::back_handler::{BackHandlerRegistry, BackSubscription};
use crate::managers::scroll_manager::ScrollManager;
use crate::services::message_bridge::parse_page_message;
use crate::services::navigation_policy::{NavigationPolicy, NavigationPolicyTrait};
use crate::services::progress::{ProgressIndicator, READY_PROGRESS};
use crate::types::config::ShellConfig;
use crate::types::errors::DispatchError;
use crate::types::message::PageMessage;
use crate::types::navigation::{NavigationDecision, NewWindowAction};

/// OS facility that opens a URL with the default handler for its scheme.
pub trait ExternalDispatcher {
    fn open_external(&self, url: &str) -> Result<(), DispatchError>;
}

/// The embedded browser instance this shell drives.
pub trait BrowserHandle {
    /// In-page history back.
    fn go_back(&self);
    /// Full reload of the current page.
    fn reload(&self);
}

/// The enclosing navigation stack.
pub trait HostNavigator {
    /// Pop this screen.
    fn go_back(&self);
}

/// One embedded browser pointed at a fixed origin.
pub struct EmbeddedBrowserShell<D, B, H> {
    config: ShellConfig,
    policy: NavigationPolicy,
    progress: ProgressIndicator,
    can_go_back: bool,
    scroll: ScrollManager,
    dispatcher: D,
    browser: B,
    host: H,
}

impl<D, B, H> EmbeddedBrowserShell<D, B, H>
where
    D: ExternalDispatcher,
    B: BrowserHandle,
    H: HostNavigator,
{
    /// Creates a shell in its mount state: no progress, no back history,
    /// at top, not refreshing.
    pub fn new(config: ShellConfig, dispatcher: D, browser: B, host: H) -> Self {
        let policy = NavigationPolicy::new(&config);
        let scroll = ScrollManager::new(config.pull_to_refresh());
        Self {
            config,
            policy,
            progress: ProgressIndicator::new(),
            can_go_back: false,
            scroll,
            dispatcher,
            browser,
            host,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The URL the embedded browser loads first.
    pub fn initial_url(&self) -> &str {
        self.config.origin_url()
    }

    // ─── Navigation interception ───

    /// Decides whether the browser may load `url`.
    ///
    /// Same-origin URLs are allowed. Every other URL is denied and handed to
    /// the OS exactly once, whatever its scheme.
    pub fn decide_navigation(&self, url: &str) -> NavigationDecision {
        let decision = self.policy.decide(url);
        if !decision.is_allowed() {
            self.dispatch_external(url);
        }
        decision
    }

    /// Handles a request for a second browsing context. The request itself is
    /// always refused; a same-origin URL comes back for in-view loading.
    pub fn handle_new_window(&self, url: &str) -> Option<String> {
        match self.policy.new_window_action(url) {
            NewWindowAction::LoadInView(url) => Some(url),
            NewWindowAction::Dispatch(url) => {
                self.dispatch_external(&url);
                None
            }
        }
    }

    // ─── Load lifecycle ───

    pub fn on_load_start(&mut self) {
        self.progress.set(0.0, Instant::now());
    }

    pub fn on_load_progress(&mut self, fraction: f64) {
        self.progress.set(fraction, Instant::now());
    }

    /// The new document has been parsed. Advances a running load to
    /// [`READY_PROGRESS`]; a finished load stays finished.
    pub fn on_document_ready(&mut self) {
        if self.progress.is_visible() && self.progress.progress() < READY_PROGRESS {
            self.on_load_progress(READY_PROGRESS);
        }
    }

    /// Load completion: progress reaches 1 and any refresh ends.
    pub fn on_load_end(&mut self) {
        if self.progress.progress() < 1.0 {
            self.progress.set(1.0, Instant::now());
        }
        self.scroll.finish_refresh();
    }

    pub fn on_navigation_state_change(&mut self, can_go_back: bool) {
        self.can_go_back = can_go_back;
    }

    // ─── Back button ───

    /// Back goes to page history when there is any, otherwise pops this
    /// screen. The event is consumed either way.
    pub fn on_hardware_back_press(&mut self) -> bool {
        if self.can_go_back {
            debug!("Back press: in-page history");
            self.browser.go_back();
        } else {
            debug!("Back press: host navigation");
            self.host.go_back();
        }
        true
    }

    // ─── Scroll and refresh ───

    pub fn on_scroll(&mut self, offset_y: f64) {
        self.scroll.on_scroll(offset_y);
    }

    /// Starts a full reload if the page is at the top and no refresh is in
    /// flight. Returns whether it did.
    pub fn on_pull_to_refresh(&mut self) -> bool {
        if !self.scroll.try_begin_refresh() {
            debug!(
                "Pull ignored (at top: {}, refreshing: {})",
                self.scroll.is_at_top(),
                self.scroll.is_refreshing()
            );
            return false;
        }
        info!("Pull-to-refresh: reloading");
        self.browser.reload();
        true
    }

    // ─── Page messages ───

    /// Handles a raw page-to-host payload. Malformed payloads are ignored.
    pub fn on_message(&mut self, payload: &str) {
        match parse_page_message(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => debug!("Ignoring page message: {}", e),
        }
    }

    /// Handles an already validated page message.
    pub fn handle_message(&mut self, message: PageMessage) {
        match message {
            PageMessage::OpenExternal(url) => self.dispatch_external(&url),
            PageMessage::Scroll(y) => self.on_scroll(y),
            PageMessage::Pull => {
                self.on_pull_to_refresh();
            }
            PageMessage::NavigationState { can_go_back } => {
                self.on_navigation_state_change(can_go_back)
            }
            PageMessage::Back => {
                self.on_hardware_back_press();
            }
            PageMessage::Ready => self.on_document_ready(),
        }
    }

    // ─── State ───

    pub fn progress(&self) -> f64 {
        self.progress.progress()
    }

    pub fn progress_indicator(&self) -> &ProgressIndicator {
        &self.progress
    }

    /// The progress bar exists in the layout only while loading.
    pub fn is_progress_visible(&self) -> bool {
        self.progress.is_visible()
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn is_at_top(&self) -> bool {
        self.scroll.is_at_top()
    }

    pub fn is_refreshing(&self) -> bool {
        self.scroll.is_refreshing()
    }

    pub fn outer_scroll_enabled(&self) -> bool {
        self.scroll.outer_scroll_enabled()
    }

    pub fn inner_scroll_enabled(&self) -> bool {
        self.scroll.inner_scroll_enabled()
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn dispatch_external(&self, url: &str) {
        let kind = NavigationPolicy::classify_external(url);
        info!("Dispatching {:?} link externally: {}", kind, url);
        if let Err(e) = self.dispatcher.open_external(url) {
            warn!("External dispatch failed: {}", e);
        }
    }
}

/// Subscribes `shell` to hardware back presses for as long as the returned
/// guard lives.
pub fn mount_back_handler<D, B, H>(
    registry: &BackHandlerRegistry,
    shell: std::sync::Arc<std::sync::Mutex<EmbeddedBrowserShell<D, B, H>>>,
) -> BackSubscription
where
    D: ExternalDispatcher + Send + 'static,
    B: BrowserHandle + Send + 'static,
    H: HostNavigator + Send + 'static,
{
    registry.register(move || match shell.lock() {
        Ok(mut s) => s.on_hardware_back_press(),
        Err(poisoned) => poisoned.into_inner().on_hardware_back_press(),
    })
}
