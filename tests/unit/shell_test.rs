//! Tests for the EmbeddedBrowserShell event handlers.
//!
//! The browser, host stack and OS opener are replaced by recording doubles so
//! each handler's side effects can be counted exactly.

use std::cell::{Cell, RefCell};
use std::sync::{Arc, Mutex};

use rstest::rstest;
use webshell::managers::back_handler::BackHandlerRegistry;
use webshell::shell::{
    mount_back_handler, BrowserHandle, EmbeddedBrowserShell, ExternalDispatcher, HostNavigator,
};
use webshell::types::config::ShellConfig;
use webshell::types::errors::DispatchError;
use webshell::types::navigation::NavigationDecision;

const ORIGIN: &str = "https://vistara.live/";

#[derive(Default)]
struct RecordingDispatcher {
    opened: RefCell<Vec<String>>,
    fail: bool,
}

impl ExternalDispatcher for RecordingDispatcher {
    fn open_external(&self, url: &str) -> Result<(), DispatchError> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            return Err(DispatchError::Spawn {
                url: url.to_string(),
                reason: "no handler".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingBrowser {
    back: Cell<usize>,
    reloads: Cell<usize>,
}

impl BrowserHandle for RecordingBrowser {
    fn go_back(&self) {
        self.back.set(self.back.get() + 1);
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

#[derive(Default)]
struct RecordingHost {
    back: Cell<usize>,
}

impl HostNavigator for RecordingHost {
    fn go_back(&self) {
        self.back.set(self.back.get() + 1);
    }
}

type TestShell = EmbeddedBrowserShell<RecordingDispatcher, RecordingBrowser, RecordingHost>;

fn shell_with(pull_to_refresh: bool, dispatcher: RecordingDispatcher) -> TestShell {
    EmbeddedBrowserShell::new(
        ShellConfig::new(ORIGIN, pull_to_refresh).unwrap(),
        dispatcher,
        RecordingBrowser::default(),
        RecordingHost::default(),
    )
}

fn shell() -> TestShell {
    shell_with(true, RecordingDispatcher::default())
}

fn opened(shell: &TestShell) -> Vec<String> {
    shell.dispatcher().opened.borrow().clone()
}

// === Mount state ===

#[test]
fn test_initial_state() {
    let s = shell();
    assert_eq!(s.initial_url(), ORIGIN);
    assert_eq!(s.progress(), 0.0);
    assert!(s.is_progress_visible());
    assert!(!s.can_go_back());
    assert!(s.is_at_top());
    assert!(!s.is_refreshing());
}

// === Navigation interception ===

#[test]
fn test_initial_load_is_allowed_without_dispatch() {
    let s = shell();
    assert_eq!(s.decide_navigation(ORIGIN), NavigationDecision::Allow);
    assert!(opened(&s).is_empty());
}

#[rstest]
#[case("tel:12345")]
#[case("mailto:team@vistara.live")]
#[case("https://wa.me/15551234567")]
#[case("https://instagram.com/vistara")]
#[case("market://details?id=live.vistara")]
fn test_off_origin_is_denied_and_dispatched_once(#[case] url: &str) {
    let s = shell();
    assert_eq!(s.decide_navigation(url), NavigationDecision::DenyAndDispatch);
    assert_eq!(opened(&s), vec![url.to_string()]);
}

#[test]
fn test_dispatch_failure_is_swallowed() {
    let s = shell_with(
        true,
        RecordingDispatcher {
            fail: true,
            ..Default::default()
        },
    );
    assert_eq!(
        s.decide_navigation("tel:12345"),
        NavigationDecision::DenyAndDispatch
    );
    assert_eq!(opened(&s).len(), 1);
}

#[test]
fn test_new_window_same_origin_loads_in_view() {
    let s = shell();
    assert_eq!(
        s.handle_new_window("https://vistara.live/tickets"),
        Some("https://vistara.live/tickets".to_string())
    );
    assert!(opened(&s).is_empty());
}

#[test]
fn test_new_window_cross_origin_dispatches() {
    let s = shell();
    assert_eq!(s.handle_new_window("https://example.com/"), None);
    assert_eq!(opened(&s), vec!["https://example.com/".to_string()]);
}

// === Load progress ===

#[test]
fn test_progress_lifecycle() {
    let mut s = shell();
    s.on_load_start();
    assert_eq!(s.progress(), 0.0);
    assert!(s.is_progress_visible());

    s.on_load_progress(0.4);
    assert_eq!(s.progress(), 0.4);
    assert!(s.is_progress_visible());

    s.on_load_progress(1.0);
    assert!(!s.is_progress_visible());

    s.on_load_start();
    assert!(s.is_progress_visible());
    s.on_load_end();
    assert_eq!(s.progress(), 1.0);
    assert!(!s.is_progress_visible());
}

#[test]
fn test_document_ready_advances_running_load() {
    let mut s = shell();
    s.on_load_start();
    s.on_message(r#"{"event":"ready"}"#);
    assert_eq!(s.progress(), 0.5);
    assert!(s.is_progress_visible());

    s.on_load_progress(0.8);
    s.on_message(r#"{"event":"ready"}"#);
    assert_eq!(s.progress(), 0.8);
}

#[test]
fn test_document_ready_after_load_end_keeps_bar_hidden() {
    let mut s = shell();
    s.on_load_start();
    s.on_load_end();
    s.on_message(r#"{"event":"ready"}"#);
    assert_eq!(s.progress(), 1.0);
    assert!(!s.is_progress_visible());
}

// === Back button ===

#[test]
fn test_back_with_history_goes_back_in_page() {
    let mut s = shell();
    s.on_navigation_state_change(true);
    assert!(s.on_hardware_back_press());
    assert_eq!(s.browser().back.get(), 1);
    assert_eq!(s.host().back.get(), 0);
}

#[test]
fn test_back_without_history_pops_screen() {
    let mut s = shell();
    s.on_navigation_state_change(true);
    s.on_navigation_state_change(false);
    assert!(s.on_hardware_back_press());
    assert_eq!(s.browser().back.get(), 0);
    assert_eq!(s.host().back.get(), 1);
}

#[test]
fn test_mounted_back_handler_routes_to_shell_until_dropped() {
    let registry = BackHandlerRegistry::new();
    let state = Arc::new(Mutex::new(EmbeddedBrowserShell::new(
        ShellConfig::new(ORIGIN, true).unwrap(),
        SendDispatcher,
        SendCounter::default(),
        SendCounter::default(),
    )));

    let subscription = mount_back_handler(&registry, state.clone());
    assert!(registry.dispatch());
    assert_eq!(*state.lock().unwrap().host().0.lock().unwrap(), 1);

    drop(subscription);
    assert_eq!(registry.handler_count(), 0);
    assert!(!registry.dispatch());
    assert_eq!(*state.lock().unwrap().host().0.lock().unwrap(), 1);
}

struct SendDispatcher;

impl ExternalDispatcher for SendDispatcher {
    fn open_external(&self, _url: &str) -> Result<(), DispatchError> {
        Ok(())
    }
}

#[derive(Default)]
struct SendCounter(Mutex<usize>);

impl SendCounter {
    fn bump(&self) {
        *self.0.lock().unwrap() += 1;
    }
}

impl BrowserHandle for SendCounter {
    fn go_back(&self) {
        self.bump();
    }

    fn reload(&self) {
        self.bump();
    }
}

impl HostNavigator for SendCounter {
    fn go_back(&self) {
        self.bump();
    }
}

// === Scroll and pull-to-refresh ===

#[test]
fn test_pull_at_top_reloads_and_load_end_clears() {
    let mut s = shell();
    assert!(s.on_pull_to_refresh());
    assert!(s.is_refreshing());
    assert_eq!(s.browser().reloads.get(), 1);

    s.on_load_end();
    assert!(!s.is_refreshing());
}

#[test]
fn test_second_pull_before_load_end_does_not_reload() {
    let mut s = shell();
    let pulls = (
        s.on_pull_to_refresh(),
        s.on_pull_to_refresh(),
        s.on_pull_to_refresh(),
    );
    assert_eq!(pulls, (true, false, false));
    assert_eq!(s.browser().reloads.get(), 1);
    assert!(s.is_refreshing());

    s.on_load_end();
    assert!(s.on_pull_to_refresh());
    assert_eq!(s.browser().reloads.get(), 2);
}

#[test]
fn test_pull_away_from_top_is_ignored() {
    let mut s = shell();
    s.on_scroll(300.0);
    assert!(!s.is_at_top());
    assert!(!s.on_pull_to_refresh());
    assert!(!s.is_refreshing());
    assert_eq!(s.browser().reloads.get(), 0);

    s.on_scroll(0.0);
    assert!(s.on_pull_to_refresh());
}

#[test]
fn test_pull_without_refresh_variant_is_ignored() {
    let mut s = shell_with(false, RecordingDispatcher::default());
    assert!(!s.on_pull_to_refresh());
    assert_eq!(s.browser().reloads.get(), 0);
    assert!(s.inner_scroll_enabled());
}

// === Page messages ===

#[test]
fn test_url_message_dispatches_once() {
    let mut s = shell();
    s.on_message(r#"{"url":"tel:12345"}"#);
    assert_eq!(opened(&s), vec!["tel:12345".to_string()]);
}

#[test]
fn test_url_message_with_event_key_still_dispatches() {
    let mut s = shell();
    s.on_message(r#"{"event":"share","url":"https://wa.me/1?text=hi&x=1"}"#);
    assert_eq!(opened(&s), vec!["https://wa.me/1?text=hi&x=1".to_string()]);
}

#[rstest]
#[case("not json")]
#[case(r#"{"url":""}"#)]
#[case(r#"{"nope":true}"#)]
fn test_bad_messages_dispatch_nothing(#[case] payload: &str) {
    let mut s = shell();
    s.on_message(payload);
    assert!(opened(&s).is_empty());
}

#[test]
fn test_event_messages_drive_state() {
    let mut s = shell();
    s.on_message(r#"{"event":"navigation_state","canGoBack":true}"#);
    assert!(s.can_go_back());

    s.on_message(r#"{"event":"scroll","y":42}"#);
    assert!(!s.is_at_top());
    assert!(!s.outer_scroll_enabled());

    s.on_message(r#"{"event":"pull"}"#);
    assert_eq!(s.browser().reloads.get(), 0);

    s.on_message(r#"{"event":"back"}"#);
    assert_eq!(s.browser().back.get(), 1);
}
