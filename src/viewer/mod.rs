//! Best-effort "open the report in the default viewer".
//!
//! Modeled as a small platform capability rather than ad-hoc error
//! suppression: each platform variant knows its open helper and returns a
//! `Result` the caller may log and ignore. Nothing here ever changes the
//! process exit status.

use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::Duration;

/// Delay before the open attempt, to avoid racing the final file flush.
const OPEN_DELAY: Duration = Duration::from_millis(500);

/// Host-specific open mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launcher {
    /// `cmd /C start` on Windows.
    Windows,
    /// `open` on macOS.
    MacOs,
    /// `xdg-open` on Linux and friends.
    Xdg,
}

impl Launcher {
    /// Pick the launcher for the compile-time host platform.
    pub fn for_host() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "macos") {
            Some(Self::MacOs)
        } else if cfg!(unix) {
            Some(Self::Xdg)
        } else {
            None
        }
    }

    fn command(self, path: &Path) -> Command {
        match self {
            Self::Windows => {
                let mut c = Command::new("cmd");
                // The empty string is `start`'s window title slot; without it
                // a quoted path would be taken as the title.
                c.args(["/C", "start", ""]).arg(path);
                c
            }
            Self::MacOs => {
                let mut c = Command::new("open");
                c.arg(path);
                c
            }
            Self::Xdg => {
                let mut c = Command::new("xdg-open");
                c.arg(path);
                c
            }
        }
    }
}

/// Try to open `path` with the host's default handler.
///
/// Advisory only: callers print the error and carry on.
pub fn open_document(path: &Path) -> Result<(), String> {
    let Some(launcher) = Launcher::for_host() else {
        return Err("no known open helper for this platform".to_string());
    };

    thread::sleep(OPEN_DELAY);

    let status = launcher
        .command(path)
        .spawn()
        .and_then(|mut child| child.wait())
        .map_err(|e| format!("failed to run open helper: {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("open helper exited with {status}"))
    }
}
