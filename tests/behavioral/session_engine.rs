// ABOUTME: Behavioral tests for the session engine driven from YAML projects
//
// The recording commander stands in for tmux, so these run everywhere and
// assert the exact tmux call sequence a project produces.

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

use muxup::config::{parse_config, Config};
use muxup::session::{Options, RuntimeContext, SessionManager};
use muxup::testing::RecordingCommander;
use muxup::tmux::Tmux;

const OUTSIDE: RuntimeContext = RuntimeContext { inside_tmux: false };

fn load(yaml: &str) -> Result<Config> {
    Ok(parse_config(
        yaml,
        &HashMap::new(),
        &HashMap::<String, String>::new(),
    )?)
}

fn manager(config: &Config) -> (RecordingCommander, SessionManager<RecordingCommander>) {
    let commander = RecordingCommander::new();
    commander.fail("has-session");
    let tmux = Tmux::new(commander.clone(), config.tmux_options.clone());
    (commander, SessionManager::new(tmux))
}

#[tokio::test]
async fn test_minimal_project_call_sequence() -> Result<()> {
    let config = load(
        "
session: ses
root: root
before_start:
  - cmd1
windows:
  - name: win1
",
    )?;
    let (commander, manager) = manager(&config);

    manager.start(&config, &Options::default(), OUTSIDE).await?;

    assert_eq!(
        commander.commands(),
        vec![
            "tmux has-session -t ses:",
            "/bin/sh -c cmd1",
            "tmux new-session -Pd -s ses -n muxup_def -c root -F #{window_id}",
            "tmux new-window -Pd -t ses: -n win1 -c root -F #{window_id}",
            "tmux select-layout -t @2 even-horizontal",
            "tmux kill-window -t @1",
            "tmux move-window -r -t ses",
            "tmux attach -d -t ses:win1",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_server_options_reach_every_tmux_call() -> Result<()> {
    let config = load(
        "
session: ses
root: /srv
tmux_options:
  socket_name: work
windows:
  - name: w
",
    )?;
    let (commander, manager) = manager(&config);

    manager.start(&config, &Options::default(), OUTSIDE).await?;

    for line in commander.commands() {
        assert!(line.starts_with("tmux -L work "), "unexpected call: {line}");
    }
    Ok(())
}

#[tokio::test]
async fn test_pane_commands_go_to_their_pane() -> Result<()> {
    let config = load(
        "
session: ses
root: /srv
windows:
  - name: dev
    commands:
      - vim
    panes:
      - type: horizontal
        root: api
        commands:
          - cargo watch
      - type: vertical
        root: /var/log
        commands:
          - tail -f syslog
",
    )?;
    let (commander, manager) = manager(&config);

    manager.start(&config, &Options::default(), OUTSIDE).await?;

    let keys: Vec<String> = commander
        .commands()
        .into_iter()
        .filter(|c| c.contains("send-keys") || c.contains("split-window"))
        .collect();
    assert_eq!(
        keys,
        vec![
            "tmux send-keys -t @2 vim Enter",
            "tmux split-window -Pd -t @2 -c /srv/api -h -F #{pane_id}",
            "tmux send-keys -t %1 cargo watch Enter",
            "tmux split-window -Pd -t @2 -c /var/log -v -F #{pane_id}",
            "tmux send-keys -t %2 tail -f syslog Enter",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_detached_chain_member_never_attaches() -> Result<()> {
    let config = load("session: ses\nroot: /srv\nwindows:\n  - name: w\n")?;
    let (commander, manager) = manager(&config);
    let options = Options {
        detach: true,
        ..Options::default()
    };

    manager.start(&config, &options, OUTSIDE).await?;

    assert_eq!(commander.count("attach"), 0);
    assert_eq!(commander.count("kill-window"), 1);
    Ok(())
}
