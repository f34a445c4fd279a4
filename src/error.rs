// ABOUTME: Error taxonomy for muxup
//
// ShellError describes a single external command that failed to launch or
// exited non-zero. MuxError is what the session engine, the tmux client and
// the config loader return to callers.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Why an external command did not succeed
#[derive(Error, Debug)]
pub enum ShellFailure {
    #[error("failed to launch: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{status}: {output}")]
    Exit { status: ExitStatus, output: String },
}

/// An external command exited non-zero or could not be launched
#[derive(Error, Debug)]
#[error("cannot run {command:?}: {source}")]
pub struct ShellError {
    /// The full command line, shell-escaped
    pub command: String,
    #[source]
    pub source: ShellFailure,
}

impl ShellError {
    pub fn new(command: impl Into<String>, source: ShellFailure) -> Self {
        Self {
            command: command.into(),
            source,
        }
    }

    /// Exit code of the failed command, if it ran at all
    pub fn exit_code(&self) -> Option<i32> {
        match &self.source {
            ShellFailure::Exit { status, .. } => status.code(),
            ShellFailure::Spawn(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum MuxError {
    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error("no configuration found for project '{project}'")]
    ConfigNotFound { project: String },

    #[error("cannot use -i flag outside of a tmux session")]
    CannotNest,

    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("unexpected output from {command:?}: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MuxError>;
