//! WebShell: a single-site embedded browser shell.
//!
//! In-origin navigation stays inside the embedded view; telephone, email,
//! messaging and off-origin links go to the operating system's handlers.
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod managers;
pub mod platform;
pub mod services;
pub mod shell;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
