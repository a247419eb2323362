//! WebView shell application using `wry` + `tao`.
//!
//! Architecture:
//! - One window, one WebView, loading the configured origin.
//! - `with_navigation_handler` runs every prospective navigation through
//!   [`EmbeddedBrowserShell::decide_navigation`].
//! - `with_initialization_script` injects the page bridge (link
//!   interception, scroll/pull/back/history reporting, progress overlay,
//!   scroll ownership).
//! - IPC from JS → Rust via `window.ipc.postMessage()`.
//! - Browser and host actions requested by the shell are posted back to the
//!   event loop as [`UserEvent`]s and executed against the WebView there.
//! - After every batch of events the progress bar and scroll ownership are
//!   pushed to the page when they differ from what the current document
//!   last received.

use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::managers::back_handler::BackHandlerRegistry;
use crate::platform::SystemOpener;
use crate::services::message_bridge::{
    injected_script, parse_page_message, progress_script, scroll_ownership_script,
};
use crate::shell::{mount_back_handler, BrowserHandle, EmbeddedBrowserShell, HostNavigator};
use crate::types::config::{ShellConfig, WindowSettings};
use crate::types::message::PageMessage;

/// Frame interval while the progress bar is animating.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug)]
enum UserEvent {
    LoadUrl(String),
    EvalScript(String),
    /// Shell state changed; re-render the progress bar.
    StateChanged,
    /// A new document is up; it has none of the overlay state yet.
    PageReady,
    /// The host stack popped this screen.
    CloseScreen,
}

type Shell = EmbeddedBrowserShell<SystemOpener, ProxyBrowser, ProxyHost>;

/// [`BrowserHandle`] that forwards to the WebView through the event loop.
struct ProxyBrowser {
    proxy: EventLoopProxy<UserEvent>,
}

impl BrowserHandle for ProxyBrowser {
    fn go_back(&self) {
        let _ = self
            .proxy
            .send_event(UserEvent::EvalScript("window.history.back()".into()));
    }

    fn reload(&self) {
        let _ = self
            .proxy
            .send_event(UserEvent::EvalScript("window.location.reload()".into()));
    }
}

/// The shell is the only screen, so popping it closes the window.
struct ProxyHost {
    proxy: EventLoopProxy<UserEvent>,
}

impl HostNavigator for ProxyHost {
    fn go_back(&self) {
        let _ = self.proxy.send_event(UserEvent::CloseScreen);
    }
}

fn lock(state: &Mutex<Shell>) -> MutexGuard<'_, Shell> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn Error>> {
    let config = ShellConfig::from_build()?;

    let settings = WindowSettings::BUILD;

    info!(
        "Starting shell for {} (pull-to-refresh: {})",
        config.origin_url(),
        config.pull_to_refresh()
    );

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let shell = EmbeddedBrowserShell::new(
        config.clone(),
        SystemOpener,
        ProxyBrowser {
            proxy: proxy.clone(),
        },
        ProxyHost {
            proxy: proxy.clone(),
        },
    );
    let initial_url = shell.initial_url().to_string();
    let state = Arc::new(Mutex::new(shell));

    let back_registry = BackHandlerRegistry::new();
    let mut back_subscription = Some(mount_back_handler(&back_registry, state.clone()));

    let window = WindowBuilder::new()
        .with_title(settings.title)
        .with_inner_size(tao::dpi::LogicalSize::new(settings.width, settings.height))
        .build(&event_loop)?;

    let nav_state = state.clone();
    let nw_state = state.clone();
    let nw_proxy = proxy.clone();
    let load_state = state.clone();
    let load_proxy = proxy.clone();
    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();
    let ipc_registry = back_registry.clone();

    let builder = WebViewBuilder::new()
        .with_url(&initial_url)
        .with_initialization_script(&injected_script(config.origin_url(), settings.tint_color))
        .with_navigation_handler(move |url: String| {
            lock(&nav_state).decide_navigation(&url).is_allowed()
        })
        .with_new_window_req_handler(move |url, _features| {
            debug!("[NW] {}", url);
            if let Some(url) = lock(&nw_state).handle_new_window(&url) {
                let _ = nw_proxy.send_event(UserEvent::LoadUrl(url));
            }
            wry::NewWindowResponse::Deny
        })
        .with_on_page_load_handler(move |event, url| {
            {
                let mut s = lock(&load_state);
                match event {
                    wry::PageLoadEvent::Started => {
                        debug!("[LOAD] started {}", url);
                        s.on_load_start();
                    }
                    wry::PageLoadEvent::Finished => {
                        debug!("[LOAD] finished {}", url);
                        s.on_load_end();
                    }
                }
            }
            let _ = load_proxy.send_event(UserEvent::StateChanged);
        })
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!("[IPC] {}", body.chars().take(200).collect::<String>());
            let event = match parse_page_message(body) {
                Ok(PageMessage::Back) => {
                    if !ipc_registry.dispatch() {
                        debug!("Back press not consumed");
                    }
                    UserEvent::StateChanged
                }
                Ok(PageMessage::Ready) => {
                    lock(&ipc_state).handle_message(PageMessage::Ready);
                    UserEvent::PageReady
                }
                Ok(message) => {
                    lock(&ipc_state).handle_message(message);
                    UserEvent::StateChanged
                }
                Err(e) => {
                    debug!("Ignoring page message: {}", e);
                    return;
                }
            };
            let _ = ipc_proxy.send_event(event);
        })
        .with_devtools(settings.devtools)
        .with_background_color(settings.background_color);

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("Failed to get GTK vbox")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    // Last (fraction, visible) and (outer, inner) pushed to the current document.
    let mut drawn: Option<(f64, bool)> = None;
    let mut owned: Option<(bool, bool)> = None;
    let mut exiting = false;

    event_loop.run(move |event, _, control_flow| {
        if exiting {
            *control_flow = ControlFlow::Exit;
            return;
        }
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                back_subscription.take();
                exiting = true;
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::LoadUrl(url) => {
                    debug!("[LOAD] {}", url);
                    let _ = webview.load_url(&url);
                }
                UserEvent::EvalScript(js) => {
                    let _ = webview.evaluate_script(&js);
                }
                UserEvent::StateChanged => {}
                UserEvent::PageReady => {
                    drawn = None;
                    owned = None;
                }
                UserEvent::CloseScreen => {
                    info!("Host navigation back from root screen, closing");
                    back_subscription.take();
                    exiting = true;
                    *control_flow = ControlFlow::Exit;
                }
            },

            Event::MainEventsCleared => {
                let now = Instant::now();
                let (shown, visible, animating, ownership) = {
                    let s = lock(&state);
                    let indicator = s.progress_indicator();
                    (
                        indicator.displayed(now),
                        s.is_progress_visible(),
                        indicator.is_animating(now),
                        (s.outer_scroll_enabled(), s.inner_scroll_enabled()),
                    )
                };
                if drawn != Some((shown, visible)) {
                    let _ = webview.evaluate_script(&progress_script(shown, visible));
                    drawn = Some((shown, visible));
                }
                if owned != Some(ownership) {
                    let (outer, inner) = ownership;
                    let _ = webview.evaluate_script(&scroll_ownership_script(outer, inner));
                    owned = Some(ownership);
                }
                if animating {
                    *control_flow = ControlFlow::WaitUntil(now + FRAME);
                }
            }

            _ => {}
        }
    });
}
