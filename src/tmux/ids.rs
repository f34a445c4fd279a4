// ABOUTME: Typed tmux targets
//
// Creation calls hand back tmux's own volatile ids (@3, %7) and later calls
// target those ids rather than display names. Names are only used where the
// caller deliberately addresses "session:window" after creation succeeded.

use std::fmt;

/// Anything that can be passed to tmux as `-t <target>`
pub trait Target {
    fn target(&self) -> String;
}

/// A session, addressed by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Address a window of this session by its display name
    pub fn window(&self, name: &str) -> WindowRef {
        WindowRef {
            session: self.clone(),
            name: name.to_string(),
        }
    }
}

impl Target for SessionId {
    /// The trailing colon keeps tmux from matching a window named like the session
    fn target(&self) -> String {
        format!("{}:", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A window id as issued by tmux (`@N`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(String);

impl WindowId {
    /// Accepts only tmux window ids
    pub fn parse(raw: &str) -> Option<Self> {
        parse_prefixed(raw, '@').map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Target for WindowId {
    fn target(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pane id as issued by tmux (`%N`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneId(String);

impl PaneId {
    /// Accepts only tmux pane ids
    pub fn parse(raw: &str) -> Option<Self> {
        parse_prefixed(raw, '%').map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Target for PaneId {
    fn target(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A window addressed as `session:name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRef {
    session: SessionId,
    name: String,
}

impl Target for WindowRef {
    fn target(&self) -> String {
        format!("{}:{}", self.session.name(), self.name)
    }
}

fn parse_prefixed(raw: &str, prefix: char) -> Option<String> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(raw.to_string())
}
