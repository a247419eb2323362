// Shell platform support for Windows
// Dispatch: rundll32 url.dll,FileProtocolHandler
//
// The URL comes from page content, so it must never pass through cmd.exe,
// where `&`, `|`, `^` and `%` are command syntax.

use std::process::Command;

/// Command that hands `url` to the registered protocol handler.
pub fn open_command(url: &str) -> Command {
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", url]);
    cmd
}
