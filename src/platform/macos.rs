// Shell platform support for macOS
// Dispatch: open

use std::process::Command;

/// Command that hands `url` to Launch Services.
pub fn open_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}
