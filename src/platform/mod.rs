// Shell platform abstraction
// Provides external URL dispatch for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time. Every opener module is
// also compiled under test so its command line can be checked on any host.

use std::io;
use std::process::Command;
use std::thread;

use log::{debug, info};

use crate::shell::ExternalDispatcher;
use crate::types::errors::DispatchError;

#[cfg(any(target_os = "linux", test))]
mod linux;

#[cfg(any(target_os = "macos", test))]
mod macos;

#[cfg(any(target_os = "windows", test))]
mod windows;

fn open_command(url: &str) -> Option<Command> {
    #[cfg(target_os = "linux")]
    {
        Some(linux::open_command(url))
    }
    #[cfg(target_os = "macos")]
    {
        Some(macos::open_command(url))
    }
    #[cfg(target_os = "windows")]
    {
        Some(windows::open_command(url))
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        let _ = url;
        None
    }
}

/// Starts `cmd` and reaps it on a background thread once it exits.
fn spawn_detached(mut cmd: Command) -> io::Result<()> {
    let mut child = cmd.spawn()?;
    thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Opener exited with {}", status),
        Err(e) => debug!("Failed to wait for opener: {}", e),
    });
    Ok(())
}

/// Hands a URL to the operating system's default handler for its scheme.
///
/// Returns once the opener process has started; it is reaped in the
/// background.
pub fn open_external(url: &str) -> Result<(), DispatchError> {
    if url.trim().is_empty() {
        return Err(DispatchError::EmptyUrl);
    }

    let cmd = open_command(url).ok_or_else(|| DispatchError::Spawn {
        url: url.to_string(),
        reason: "no external URL handler on this platform".to_string(),
    })?;

    info!("Opening external URL: {}", url);
    spawn_detached(cmd).map_err(|e| DispatchError::Spawn {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// [`ExternalDispatcher`] backed by the platform opener.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl ExternalDispatcher for SystemOpener {
    fn open_external(&self, url: &str) -> Result<(), DispatchError> {
        open_external(url)
    }
}
