// Shell state managers
// Managers own mutable shell state: scroll anchor and refresh, back-button subscriptions.

pub mod back_handler;
pub mod scroll_manager;
