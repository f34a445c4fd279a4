// ABOUTME: tmux plumbing for muxup
//
// - commander: spawns external processes (tmux and /bin/sh -c lines)
// - ids: typed targets handed back by creation calls
// - client: one method per tmux primitive

pub mod client;
pub mod commander;
pub mod ids;

pub use client::{Tmux, TmuxPane, TmuxWindow};
pub use commander::{Commander, DefaultCommander};
pub use ids::{PaneId, SessionId, Target, WindowId, WindowRef};
