//! Editor detection for `muxup new` and `muxup edit`.
//!
//! `$EDITOR` wins; otherwise the first installed terminal editor from
//! [`EDITORS`] is used.

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::config::Environment;
use crate::error::Result;
use crate::tmux::Commander;

/// Fallback editor executables, in preference order.
pub const EDITORS: &[&str] = &["nvim", "vim", "vi", "nano", "emacs"];

/// Check if a command exists on the system.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Editor command line to use: `$EDITOR` if set and non-empty, else the first
/// installed fallback.
pub fn resolve_editor(env: &impl Environment) -> Option<String> {
    resolve_editor_with(env, command_exists)
}

fn resolve_editor_with(env: &impl Environment, installed: impl Fn(&str) -> bool) -> Option<String> {
    env.var("EDITOR")
        .filter(|editor| !editor.trim().is_empty())
        .or_else(|| {
            EDITORS
                .iter()
                .copied()
                .find(|cmd| installed(cmd))
                .map(str::to_string)
        })
}

/// Build the command that opens `path` in `editor`.
///
/// `editor` may carry its own arguments (`code -w`).
pub fn editor_command(editor: &str, path: &Path) -> Command {
    let mut words = editor.split_whitespace();
    let mut cmd = Command::new(words.next().unwrap_or(editor));
    cmd.args(words).arg(path);
    cmd
}

/// Open `path` in `editor` with the terminal handed over until it exits.
pub async fn open_in_editor(commander: &impl Commander, editor: &str, path: &Path) -> Result<()> {
    debug!("Opening {} with '{}'", path.display(), editor);
    commander
        .exec_silently(editor_command(editor, path))
        .await?;
    Ok(())
}
