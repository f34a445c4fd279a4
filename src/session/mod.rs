// ABOUTME: Session engine - reconciles a Config against the live tmux server
//
// Start builds (or re-attaches to) a session, Stop tears it down, Reflect
// reads a live session back into a Config. Every tmux call and every shell
// line is awaited before the next one is issued; errors are returned as-is
// and rollback is left to the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{expand_path, Config, Pane, Window};
use crate::error::{MuxError, Result};
use crate::tmux::client::{EVEN_HORIZONTAL, TILED};
use crate::tmux::commander::shell;
use crate::tmux::{Commander, SessionId, Target, Tmux, WindowId};

pub mod context;
pub mod options;

pub use context::RuntimeContext;
pub use options::Options;

/// Name of the throwaway window a new session is created with
pub const PLACEHOLDER_WINDOW: &str = "muxup_def";

/// Re-tile after every this many splits so later splits still have room
const REBALANCE_EVERY: usize = 2;

/// Resolve `root` against `parent`: empty means `parent`, absolute wins,
/// anything else is joined onto `parent`
pub fn resolve_root(root: &str, parent: &Path) -> PathBuf {
    if root.is_empty() {
        return parent.to_path_buf();
    }
    let expanded = expand_path(root);
    if expanded.is_absolute() {
        expanded
    } else {
        parent.join(root)
    }
}

pub struct SessionManager<C> {
    tmux: Tmux<C>,
}

impl<C: Commander> SessionManager<C> {
    pub fn new(tmux: Tmux<C>) -> Self {
        Self { tmux }
    }

    pub fn tmux(&self) -> &Tmux<C> {
        &self.tmux
    }

    /// Bring the session described by `config` up and hand the terminal to it
    pub async fn start(
        &self,
        config: &Config,
        options: &Options,
        context: RuntimeContext,
    ) -> Result<()> {
        let inside_current = options.inside_current_session;
        if inside_current && !context.inside_tmux {
            return Err(MuxError::CannotNest);
        }

        let session = if inside_current {
            self.tmux.session_name().await?
        } else {
            SessionId::new(&config.session)
        };
        let session_root = expand_path(&config.root);

        let mut placeholder = None;
        if !self.tmux.session_exists(&session).await && !inside_current {
            info!("Creating session '{}'", session);
            self.run_shell(&config.before_start, &session_root).await?;
            placeholder = Some(
                self.tmux
                    .new_session(&session, &session_root, PLACEHOLDER_WINDOW)
                    .await?,
            );
            for (key, value) in &config.env {
                self.tmux.set_env(&session, key, value).await?;
            }
        } else if options.windows.is_empty() && !inside_current {
            if options.detach {
                debug!("Session '{}' already running, detached", session);
                return Ok(());
            }
            info!("Session '{}' already running, attaching", session);
            return self.switch_or_attach(&session, options, context).await;
        }

        let mut first_created = None;
        let mut selected = None;
        for window in config.windows.iter().filter(|w| options.selects(w)) {
            self.create_window(config, &session, &session_root, window)
                .await?;
            if first_created.is_none() {
                first_created = Some(window.name.as_str());
            }
            if window.selected {
                selected = Some(window.name.as_str());
            }
        }

        if let Some(placeholder) = placeholder {
            self.tmux.kill_window(&placeholder).await?;
            self.tmux.renumber_windows(&session).await?;
        }

        let attach_target = match options.windows.first() {
            _ if options.detach => None,
            Some(requested) => Some(session.window(requested)),
            None => first_created.map(|name| session.window(name)),
        };
        if let Some(target) = attach_target {
            if let Err(e) = self.switch_or_attach(&target, options, context).await {
                if selected.is_none() {
                    return Err(e);
                }
                warn!(
                    "Attaching to {} failed, selecting window instead: {}",
                    target.target(),
                    e
                );
            }
        }

        if let Some(name) = selected {
            self.tmux.select_window(&session.window(name)).await?;
        }

        info!("Session '{}' started", session);
        Ok(())
    }

    /// Kill the selected windows, or run the stop commands and kill the whole session
    pub async fn stop(
        &self,
        config: &Config,
        options: &Options,
        _context: RuntimeContext,
    ) -> Result<()> {
        let session = SessionId::new(&config.session);

        if options.windows.is_empty() {
            self.run_shell(&config.stop, &expand_path(&config.root)).await?;
            info!("Killing session '{}'", session);
            return self.tmux.kill_session(&session).await;
        }

        for name in &options.windows {
            info!("Killing window '{}'", name);
            self.tmux.kill_window(&session.window(name)).await?;
        }
        Ok(())
    }

    /// Snapshot the session this process is attached to
    ///
    /// The first pane of each window is the window itself, so only the panes
    /// after it are reported. Pane roots equal to the window root come back
    /// empty.
    pub async fn reflect(&self) -> Result<Config> {
        let session = self.tmux.session_name().await?;
        let mut windows = Vec::new();

        for live in self.tmux.list_windows(&session).await? {
            let panes = self
                .tmux
                .list_panes(&live.id)
                .await?
                .into_iter()
                .skip(1)
                .map(|pane| Pane {
                    root: if pane.root == live.root {
                        String::new()
                    } else {
                        pane.root
                    },
                    ..Pane::default()
                })
                .collect();

            windows.push(Window {
                name: live.name,
                root: live.root,
                layout: Some(live.layout),
                panes,
                ..Window::default()
            });
        }

        Ok(Config {
            session: session.name().to_string(),
            windows,
            ..Config::default()
        })
    }

    async fn create_window(
        &self,
        config: &Config,
        session: &SessionId,
        session_root: &Path,
        window: &Window,
    ) -> Result<WindowId> {
        let window_root = resolve_root(&window.root, session_root);
        self.run_shell(&window.before_start, &window_root).await?;

        let id = self
            .tmux
            .new_window(session, &window.name, &window_root)
            .await?;
        debug!("Created window '{}' as {}", window.name, id);

        for line in &window.commands {
            self.send_keys(config, &id, line).await?;
        }

        for (i, pane) in window.panes.iter().enumerate() {
            let pane_root = resolve_root(&pane.root, &window_root);
            let pane_id = self.tmux.split_window(&id, pane.split, &pane_root).await?;
            if i % REBALANCE_EVERY == 0 {
                self.tmux.select_layout(&id, TILED).await?;
            }
            for line in &pane.commands {
                self.send_keys(config, &pane_id, line).await?;
            }
        }

        let layout = window.layout.as_deref().unwrap_or(EVEN_HORIZONTAL);
        self.tmux.select_layout(&id, layout).await?;
        Ok(id)
    }

    async fn send_keys(&self, config: &Config, target: &impl Target, line: &str) -> Result<()> {
        if config.sendkeys_timeout > 0 {
            tokio::time::sleep(Duration::from_millis(config.sendkeys_timeout)).await;
        }
        self.tmux.send_keys(target, line).await
    }

    async fn switch_or_attach(
        &self,
        target: &impl Target,
        options: &Options,
        context: RuntimeContext,
    ) -> Result<()> {
        if context.inside_tmux {
            if options.attach {
                return self.tmux.switch_client(target).await;
            }
            Ok(())
        } else {
            self.tmux.attach(target).await
        }
    }

    /// Run shell lines in order, stopping at the first failure
    async fn run_shell(&self, lines: &[String], dir: &Path) -> Result<()> {
        for line in lines {
            debug!("Running '{}' in {}", line, dir.display());
            self.tmux.commander().exec(shell(line, dir)).await?;
        }
        Ok(())
    }
}
