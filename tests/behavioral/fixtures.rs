// ABOUTME: Shared test fixtures and utilities for behavioral tests
//
// Provides:
// - TestServer: a tmux server on a private socket, killed on drop
// - tmux_available(): Check if tmux is installed
// - require_tmux!(): Skip test if tmux unavailable

use anyhow::Result;
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use muxup::config::TmuxOptions;

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// Name unique to this process and call, safe for sockets and sessions
pub fn unique_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!(
        "muxup_test_{}_{}_{}_{}",
        prefix,
        std::process::id(),
        NEXT_ID.fetch_add(1, Ordering::SeqCst),
        nanos
    )
}

/// A tmux server reachable only through its own socket name
pub struct TestServer {
    pub socket: String,
}

impl TestServer {
    pub fn new(prefix: &str) -> Self {
        Self {
            socket: unique_name(prefix),
        }
    }

    /// Server options that route every muxup call to this server,
    /// ignoring the user's tmux.conf
    pub fn options(&self) -> TmuxOptions {
        TmuxOptions {
            socket_name: Some(self.socket.clone()),
            socket_path: None,
            config_file: Some("/dev/null".to_string()),
        }
    }

    /// Run a tmux command against this server and return its stdout
    pub fn tmux(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("tmux")
            .args(["-L", self.socket.as_str()])
            .args(args)
            .output()?;
        if !output.status.success() {
            anyhow::bail!(
                "tmux {:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(String::from_utf8(output.stdout)?)
    }

    pub fn session_exists(&self, name: &str) -> bool {
        self.tmux(&["has-session", "-t", name]).is_ok()
    }

    /// Window names of a session, in index order
    pub fn window_names(&self, session: &str) -> Result<Vec<String>> {
        Ok(self
            .tmux(&["list-windows", "-t", session, "-F", "#{window_name}"])?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Window indexes of a session, in order
    pub fn window_indexes(&self, session: &str) -> Result<Vec<u32>> {
        Ok(self
            .tmux(&["list-windows", "-t", session, "-F", "#{window_index}"])?
            .lines()
            .filter_map(|l| l.trim().parse().ok())
            .collect())
    }

    pub fn pane_count(&self, target: &str) -> Result<usize> {
        Ok(self
            .tmux(&["list-panes", "-t", target, "-F", "#{pane_id}"])?
            .lines()
            .count())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = Command::new("tmux")
            .args(["-L", self.socket.as_str(), "kill-server"])
            .output();
    }
}

/// Check if tmux is available on the system
pub fn tmux_available() -> bool {
    Command::new("tmux")
        .args(["-V"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Macro to skip test if tmux is not available
#[macro_export]
macro_rules! require_tmux {
    () => {
        if !super::fixtures::tmux_available() {
            eprintln!("Skipping test: tmux not available");
            return Ok(());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names_differ() {
        assert_ne!(unique_name("a"), unique_name("a"));
    }
}
