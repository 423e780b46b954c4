//! Opening partner storefronts.
//!
//! Opening a link is fire-and-forget: implementations never report failure to
//! the caller and never hand the opened context a reference back to us.

use std::process::{Command, Stdio};

/// Opens a URL in a new, unlinked browsing context.
pub trait LinkOpener: Send + Sync {
    fn open_new_context(&self, url: &str);
}

/// Logs the URL instead of opening anything. Used when the server should only
/// hand links back to its caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyOpener;

impl LinkOpener for LogOnlyOpener {
    fn open_new_context(&self, url: &str) {
        tracing::info!(url = %url, "Partner link ready");
    }
}

/// Opens URLs in the host's default browser.
///
/// The child process runs with all standard streams closed, so nothing reaches
/// the MCP channel on stdout. A background thread waits on it so it is reaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            // Not routed through cmd, which would treat & ^ | in the query as syntax
            let mut cmd = Command::new("rundll32");
            cmd.args(["url.dll,FileProtocolHandler", url]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl LinkOpener for SystemBrowser {
    fn open_new_context(&self, url: &str) {
        let spawned = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                tracing::debug!(url = %url, "Opened link in system browser");
                std::thread::spawn(move || {
                    if let Err(e) = child.wait() {
                        tracing::warn!(error = %e, "Failed to reap browser launcher");
                    }
                });
            }
            Err(e) => tracing::warn!(url = %url, error = %e, "Could not open system browser"),
        }
    }
}
