// ABOUTME: Behavioral tests for session start / stop against a real tmux server
//
// Every test runs its own server on a private socket and is skipped when tmux
// is not installed. Starts are detached so no test ever attaches.

use super::fixtures::{unique_name, TestServer};
use crate::require_tmux;
use anyhow::Result;
use std::collections::HashMap;
use tempfile::TempDir;

use muxup::config::{parse_config, Config};
use muxup::session::{Options, RuntimeContext, SessionManager};
use muxup::tmux::{DefaultCommander, Tmux};

const OUTSIDE: RuntimeContext = RuntimeContext { inside_tmux: false };

fn detached() -> Options {
    Options {
        detach: true,
        ..Options::default()
    }
}

fn project(server: &TestServer, root: &TempDir, yaml: &str) -> Result<Config> {
    let session = unique_name("ses");
    let mut settings = HashMap::new();
    settings.insert("session".to_string(), session);
    settings.insert("root".to_string(), root.path().display().to_string());

    let mut config = parse_config(yaml, &settings, &HashMap::<String, String>::new())?;
    config.tmux_options = server.options();
    Ok(config)
}

fn manager(config: &Config) -> SessionManager<DefaultCommander> {
    SessionManager::new(Tmux::new(DefaultCommander, config.tmux_options.clone()))
}

const PROJECT: &str = r"
session: ${session}
root: ${root}
env:
  MUXUP_TEST: enabled
windows:
  - name: editor
    panes:
      - type: horizontal
      - type: vertical
  - name: shell
    commands:
      - echo hello
  - name: logs
    manual: true
";

/// A new session gets exactly the configured windows, contiguously numbered
#[tokio::test]
async fn test_start_creates_configured_windows() -> Result<()> {
    require_tmux!();
    let server = TestServer::new("start");
    let root = TempDir::new()?;
    let config = project(&server, &root, PROJECT)?;

    manager(&config).start(&config, &detached(), OUTSIDE).await?;

    assert!(server.session_exists(&config.session));
    assert_eq!(server.window_names(&config.session)?, vec!["editor", "shell"]);
    assert_eq!(server.window_indexes(&config.session)?, vec![0, 1]);
    assert_eq!(server.pane_count(&format!("{}:editor", config.session))?, 3);

    let env = server.tmux(&["show-environment", "-t", &config.session, "MUXUP_TEST"])?;
    assert_eq!(env.trim(), "MUXUP_TEST=enabled");
    Ok(())
}

/// Starting a running session again changes nothing
#[tokio::test]
async fn test_start_is_idempotent() -> Result<()> {
    require_tmux!();
    let server = TestServer::new("idem");
    let root = TempDir::new()?;
    let config = project(&server, &root, PROJECT)?;
    let manager = manager(&config);

    manager.start(&config, &detached(), OUTSIDE).await?;
    manager.start(&config, &detached(), OUTSIDE).await?;

    assert_eq!(server.window_names(&config.session)?, vec!["editor", "shell"]);
    Ok(())
}

/// Manual windows can be added to a running session, and stopped on their own
#[tokio::test]
async fn test_selected_windows_added_and_stopped() -> Result<()> {
    require_tmux!();
    let server = TestServer::new("select");
    let root = TempDir::new()?;
    let config = project(&server, &root, PROJECT)?;
    let manager = manager(&config);

    manager.start(&config, &detached(), OUTSIDE).await?;
    let logs = Options {
        windows: vec!["logs".to_string()],
        ..detached()
    };
    manager.start(&config, &logs, OUTSIDE).await?;
    assert_eq!(
        server.window_names(&config.session)?,
        vec!["editor", "shell", "logs"]
    );

    manager.stop(&config, &logs, OUTSIDE).await?;
    assert_eq!(server.window_names(&config.session)?, vec!["editor", "shell"]);
    assert!(server.session_exists(&config.session));
    Ok(())
}

/// Stop runs the stop commands in the session root before killing the session
#[tokio::test]
async fn test_stop_runs_commands_and_kills_session() -> Result<()> {
    require_tmux!();
    let server = TestServer::new("stop");
    let root = TempDir::new()?;
    let yaml = format!("{PROJECT}stop:\n  - touch stopped\n");
    let config = project(&server, &root, &yaml)?;
    let manager = manager(&config);

    manager.start(&config, &detached(), OUTSIDE).await?;
    manager.stop(&config, &Options::default(), OUTSIDE).await?;

    assert!(root.path().join("stopped").exists());
    assert!(!server.session_exists(&config.session));
    Ok(())
}

/// A failing before_start leaves no session behind
#[tokio::test]
async fn test_failing_before_start_creates_nothing() -> Result<()> {
    require_tmux!();
    let server = TestServer::new("before");
    let root = TempDir::new()?;
    let yaml = format!("{PROJECT}before_start:\n  - touch ran\n  - exit 3\n");
    let config = project(&server, &root, &yaml)?;

    let result = manager(&config).start(&config, &detached(), OUTSIDE).await;

    assert!(result.is_err());
    assert!(root.path().join("ran").exists());
    assert!(!server.session_exists(&config.session));
    Ok(())
}
