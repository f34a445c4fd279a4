// ABOUTME: Per-invocation request for the session engine

use std::collections::HashMap;

use crate::config::Window;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Windows to act on; empty means every non-manual window
    pub windows: Vec<String>,
    /// Switch the current client even when already inside tmux
    pub attach: bool,
    /// Never attach or switch
    pub detach: bool,
    pub debug: bool,
    /// Add windows to the session this process is attached to
    pub inside_current_session: bool,
    /// key=value pairs from the command line, used for ${NAME} expansion
    pub settings: HashMap<String, String>,
}

impl Options {
    /// Whether `window` takes part in this invocation
    pub fn selects(&self, window: &Window) -> bool {
        if self.windows.is_empty() {
            !window.manual
        } else {
            self.windows.iter().any(|name| *name == window.name)
        }
    }
}
