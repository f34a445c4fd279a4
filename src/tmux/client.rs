// ABOUTME: tmux client - one method per tmux primitive
//
// Each method builds a single argv (never a shell string), prefixed with the
// config's server options, and hands it to the Commander. No method keeps
// state between calls.

use std::path::Path;

use tokio::process::Command;

use crate::config::{SplitType, TmuxOptions};
use crate::error::{MuxError, Result};
use crate::tmux::commander::{command_line, Commander};
use crate::tmux::ids::{PaneId, SessionId, Target, WindowId, WindowRef};

pub const EVEN_HORIZONTAL: &str = "even-horizontal";
pub const TILED: &str = "tiled";

const FIELD_SEPARATOR: char = '\t';

/// A live window as reported by `list-windows`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxWindow {
    pub id: WindowId,
    pub name: String,
    pub layout: String,
    pub root: String,
}

/// A live pane as reported by `list-panes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxPane {
    pub id: PaneId,
    pub root: String,
}

pub struct Tmux<C> {
    commander: C,
    options: TmuxOptions,
}

impl<C: Commander> Tmux<C> {
    pub fn new(commander: C, options: TmuxOptions) -> Self {
        Self { commander, options }
    }

    pub fn commander(&self) -> &C {
        &self.commander
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new("tmux");
        cmd.args(self.options.args()).args(args);
        cmd
    }

    /// True iff `has-session` succeeds with empty output
    pub async fn session_exists(&self, session: &SessionId) -> bool {
        let cmd = self.command(["has-session", "-t", session.target().as_str()]);
        matches!(self.commander.exec(cmd).await, Ok(output) if output.is_empty())
    }

    /// Create a detached session holding one placeholder window.
    /// Returns the placeholder's id.
    pub async fn new_session(
        &self,
        session: &SessionId,
        root: &Path,
        window_name: &str,
    ) -> Result<WindowId> {
        let mut cmd = self.command(["new-session", "-Pd", "-s", session.name(), "-n", window_name, "-c"]);
        cmd.arg(root).args(["-F", "#{window_id}"]);
        self.exec_parse(cmd, WindowId::parse).await
    }

    pub async fn new_window(&self, session: &SessionId, name: &str, root: &Path) -> Result<WindowId> {
        let mut cmd = self.command(["new-window", "-Pd", "-t", session.target().as_str(), "-n", name, "-c"]);
        cmd.arg(root).args(["-F", "#{window_id}"]);
        self.exec_parse(cmd, WindowId::parse).await
    }

    pub async fn split_window(
        &self,
        window: &WindowId,
        split: Option<SplitType>,
        root: &Path,
    ) -> Result<PaneId> {
        let mut cmd = self.command(["split-window", "-Pd", "-t", window.as_str(), "-c"]);
        cmd.arg(root);
        match split {
            Some(SplitType::Horizontal) => {
                cmd.arg("-h");
            }
            Some(SplitType::Vertical) => {
                cmd.arg("-v");
            }
            None => {}
        }
        cmd.args(["-F", "#{pane_id}"]);
        self.exec_parse(cmd, PaneId::parse).await
    }

    /// Type `line` followed by Enter
    pub async fn send_keys(&self, target: &impl Target, line: &str) -> Result<()> {
        let cmd = self.command(["send-keys", "-t", target.target().as_str(), line, "Enter"]);
        Ok(self.commander.exec_silently(cmd).await?)
    }

    pub async fn select_layout(&self, window: &WindowId, layout: &str) -> Result<()> {
        let cmd = self.command(["select-layout", "-t", window.as_str(), layout]);
        self.exec(cmd).await.map(|_| ())
    }

    pub async fn select_window(&self, window: &WindowRef) -> Result<()> {
        let cmd = self.command(["select-window", "-t", window.target().as_str()]);
        self.exec(cmd).await.map(|_| ())
    }

    pub async fn kill_window(&self, target: &impl Target) -> Result<()> {
        let cmd = self.command(["kill-window", "-t", target.target().as_str()]);
        self.exec(cmd).await.map(|_| ())
    }

    pub async fn kill_session(&self, session: &SessionId) -> Result<()> {
        let cmd = self.command(["kill-session", "-t", session.name()]);
        self.exec(cmd).await.map(|_| ())
    }

    /// Close index gaps left by a killed window
    pub async fn renumber_windows(&self, session: &SessionId) -> Result<()> {
        let cmd = self.command(["move-window", "-r", "-t", session.name()]);
        self.exec(cmd).await.map(|_| ())
    }

    pub async fn set_env(&self, session: &SessionId, key: &str, value: &str) -> Result<()> {
        let cmd = self.command(["setenv", "-t", session.name(), key, value]);
        self.exec(cmd).await.map(|_| ())
    }

    /// Hand the terminal to a tmux client until the user detaches
    pub async fn attach(&self, target: &impl Target) -> Result<()> {
        let cmd = self.command(["attach", "-d", "-t", target.target().as_str()]);
        Ok(self.commander.exec_silently(cmd).await?)
    }

    pub async fn switch_client(&self, target: &impl Target) -> Result<()> {
        let cmd = self.command(["switch-client", "-t", target.target().as_str()]);
        Ok(self.commander.exec_silently(cmd).await?)
    }

    /// Session the calling process is attached to
    pub async fn session_name(&self) -> Result<SessionId> {
        let cmd = self.command(["display-message", "-p", "#S"]);
        let output = self.exec(cmd).await?;
        Ok(SessionId::new(output.trim()))
    }

    pub async fn list_windows(&self, session: &SessionId) -> Result<Vec<TmuxWindow>> {
        let format = [
            "#{window_id}",
            "#{window_name}",
            "#{window_layout}",
            "#{pane_current_path}",
        ]
        .join(&FIELD_SEPARATOR.to_string());
        let cmd = self.command(["list-windows", "-t", session.name(), "-F", format.as_str()]);
        let line = command_line(&cmd);
        let output = self.exec(cmd).await?;
        parse_list_windows(&output).ok_or(MuxError::UnexpectedOutput {
            command: line,
            output,
        })
    }

    pub async fn list_panes(&self, window: &WindowId) -> Result<Vec<TmuxPane>> {
        let format = format!("#{{pane_id}}{FIELD_SEPARATOR}#{{pane_current_path}}");
        let cmd = self.command(["list-panes", "-t", window.as_str(), "-F", format.as_str()]);
        let line = command_line(&cmd);
        let output = self.exec(cmd).await?;
        parse_list_panes(&output).ok_or(MuxError::UnexpectedOutput {
            command: line,
            output,
        })
    }

    async fn exec(&self, cmd: Command) -> Result<String> {
        Ok(self.commander.exec(cmd).await?)
    }

    async fn exec_parse<T>(&self, cmd: Command, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        let line = command_line(&cmd);
        let output = self.exec(cmd).await?;
        parse(&output).ok_or(MuxError::UnexpectedOutput {
            command: line,
            output,
        })
    }
}

/// Parse `list-windows` output; None if any line is malformed
pub fn parse_list_windows(output: &str) -> Option<Vec<TmuxWindow>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.splitn(4, FIELD_SEPARATOR);
            Some(TmuxWindow {
                id: WindowId::parse(fields.next()?)?,
                name: fields.next()?.to_string(),
                layout: fields.next()?.to_string(),
                root: fields.next()?.to_string(),
            })
        })
        .collect()
}

/// Parse `list-panes` output; None if any line is malformed
pub fn parse_list_panes(output: &str) -> Option<Vec<TmuxPane>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (id, root) = line.split_once(FIELD_SEPARATOR)?;
            Some(TmuxPane {
                id: PaneId::parse(id)?,
                root: root.to_string(),
            })
        })
        .collect()
}
