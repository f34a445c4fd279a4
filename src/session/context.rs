// ABOUTME: Runtime context - facts about the calling process, read once

use crate::config::{Environment, ProcessEnv};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeContext {
    /// The calling process already runs inside a tmux client
    pub inside_tmux: bool,
}

impl RuntimeContext {
    /// `TMUX` set (to anything, even empty) or `TERM=screen`
    pub fn from_env(env: &impl Environment) -> Self {
        let inside_tmux =
            env.var("TMUX").is_some() || env.var("TERM").as_deref() == Some("screen");
        Self { inside_tmux }
    }

    pub fn detect() -> Self {
        Self::from_env(&ProcessEnv)
    }
}
