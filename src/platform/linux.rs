// Shell platform support for Linux
// Dispatch: xdg-open

use std::process::Command;

/// Command that hands `url` to the desktop's default handler.
pub fn open_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
