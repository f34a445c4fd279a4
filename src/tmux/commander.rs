// ABOUTME: Command runner - the single seam through which every external process is spawned
//
// The Commander trait has one production implementation (DefaultCommander)
// and a recording substitute in crate::testing. Captured output is stdout
// followed by stderr with a single trailing newline removed.

use std::borrow::Cow;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{ShellError, ShellFailure};

/// Shell used for user-declared command lines
pub const SHELL: &str = "/bin/sh";

/// Runs external commands on behalf of the tmux client and session engine
#[async_trait]
pub trait Commander: Send + Sync {
    /// Run to completion and return the combined output
    async fn exec(&self, cmd: Command) -> Result<String, ShellError>;

    /// Run to completion with stdin/stdout/stderr inherited from this process
    async fn exec_silently(&self, cmd: Command) -> Result<(), ShellError>;
}

/// Spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCommander;

#[async_trait]
impl Commander for DefaultCommander {
    async fn exec(&self, mut cmd: Command) -> Result<String, ShellError> {
        let line = command_line(&cmd);
        debug!(command = %line, "exec");

        let output = cmd.output().await.map_err(|e| {
            debug!(command = %line, error = %e, "exec failed to launch");
            ShellError::new(line.clone(), ShellFailure::Spawn(e))
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = trim_trailing_newline(&combined).to_string();

        if !output.status.success() {
            debug!(command = %line, status = %output.status, output = %combined, "exec failed");
            return Err(ShellError::new(
                line,
                ShellFailure::Exit {
                    status: output.status,
                    output: combined,
                },
            ));
        }

        Ok(combined)
    }

    async fn exec_silently(&self, mut cmd: Command) -> Result<(), ShellError> {
        let line = command_line(&cmd);
        debug!(command = %line, "exec silently");

        let status = cmd.status().await.map_err(|e| {
            debug!(command = %line, error = %e, "exec failed to launch");
            ShellError::new(line.clone(), ShellFailure::Spawn(e))
        })?;

        if !status.success() {
            debug!(command = %line, status = %status, "exec failed");
            return Err(ShellError::new(
                line,
                ShellFailure::Exit {
                    status,
                    output: String::new(),
                },
            ));
        }

        Ok(())
    }
}

/// Build a `/bin/sh -c <line>` command running in `dir`
pub fn shell(line: &str, dir: &Path) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c").arg(line).current_dir(dir);
    cmd
}

/// Render a command's argv as a single shell-escaped line
pub fn command_line(cmd: &Command) -> String {
    let std_cmd = cmd.as_std();
    std::iter::once(std_cmd.get_program())
        .chain(std_cmd.get_args())
        .map(|arg| shell_escape::escape(Cow::Owned(arg.to_string_lossy().into_owned())).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn trim_trailing_newline(s: &str) -> &str {
    s.strip_suffix('\n').unwrap_or(s)
}
