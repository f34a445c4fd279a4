//! Testing infrastructure for muxup.
//!
//! [`RecordingCommander`] stands in for [`DefaultCommander`] so the tmux client
//! and the session engine can be exercised without a tmux server. It records
//! every command line it is asked to run and answers with scripted output:
//!
//! - rules registered with [`RecordingCommander::respond`] or
//!   [`RecordingCommander::fail`] are matched first, by substring;
//! - creation calls that ask tmux to print `#{window_id}` or `#{pane_id}` get
//!   a fresh `@N` / `%N` id, the way a real server would answer;
//! - everything else returns the default output (empty unless overridden).
//!
//! # Example
//!
//! ```ignore
//! let commander = RecordingCommander::new();
//! commander.fail("has-session");
//! let tmux = Tmux::new(commander.clone(), TmuxOptions::default());
//! // ... drive the engine, then inspect commander.commands()
//! ```
//!
//! [`DefaultCommander`]: crate::tmux::DefaultCommander

use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{ShellError, ShellFailure};
use crate::tmux::Commander;

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Program and arguments joined by single spaces, unescaped
    pub line: String,
    /// Working directory, if one was set
    pub dir: Option<PathBuf>,
    /// Whether the call went through `exec_silently`
    pub silent: bool,
}

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct Recording {
    calls: Vec<RecordedCall>,
    rules: Vec<(String, Reply)>,
    default_output: String,
    next_window: u32,
    next_pane: u32,
}

/// A [`Commander`] that records calls and replays scripted output.
///
/// Clones share the same recording, so a test can hand one clone to the code
/// under test and keep another for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingCommander {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingCommander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by calls that match no rule
    pub fn with_default_output(self, output: &str) -> Self {
        self.lock().default_output = output.to_string();
        self
    }

    /// Answer calls whose command line contains `pattern` with `output`
    pub fn respond(&self, pattern: &str, output: &str) {
        self.lock()
            .rules
            .push((pattern.to_string(), Reply::Output(output.to_string())));
    }

    /// Make calls whose command line contains `pattern` exit with status 1
    pub fn fail(&self, pattern: &str) {
        self.lock()
            .rules
            .push((pattern.to_string(), Reply::Failure(format!("{pattern}: failed"))));
    }

    /// Recorded command lines, in call order
    pub fn commands(&self) -> Vec<String> {
        self.lock().calls.iter().map(|c| c.line.clone()).collect()
    }

    /// Recorded calls with their working directory and mode
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded command lines containing `pattern`
    pub fn count(&self, pattern: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.line.contains(pattern))
            .count()
    }

    /// Forget recorded calls, keeping rules
    pub fn clear(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        // A poisoned lock only means another test thread panicked mid-assertion.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, cmd: &Command, silent: bool) -> Result<String, ShellError> {
        let std_cmd = cmd.as_std();
        let line = std::iter::once(std_cmd.get_program())
            .chain(std_cmd.get_args())
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");

        let mut recording = self.lock();
        recording.calls.push(RecordedCall {
            line: line.clone(),
            dir: std_cmd.get_current_dir().map(PathBuf::from),
            silent,
        });

        let rule = recording
            .rules
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        match rule {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Failure(output)) => Err(ShellError::new(
                line,
                ShellFailure::Exit {
                    status: ExitStatus::from_raw(1 << 8),
                    output,
                },
            )),
            None if line.contains("#{window_id}") => {
                recording.next_window += 1;
                Ok(format!("@{}", recording.next_window))
            }
            None if line.contains("#{pane_id}") => {
                recording.next_pane += 1;
                Ok(format!("%{}", recording.next_pane))
            }
            None => Ok(recording.default_output.clone()),
        }
    }
}

#[async_trait]
impl Commander for RecordingCommander {
    async fn exec(&self, cmd: Command) -> Result<String, ShellError> {
        self.record(&cmd, false)
    }

    async fn exec_silently(&self, cmd: Command) -> Result<(), ShellError> {
        self.record(&cmd, true).map(|_| ())
    }
}
