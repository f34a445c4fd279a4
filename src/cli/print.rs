// ABOUTME: CLI print command - dump the current tmux session as a project config

use anyhow::{Context, Result};

use muxup::config::TmuxOptions;
use muxup::session::SessionManager;
use muxup::tmux::{DefaultCommander, Tmux};

use super::OutputFormat;

/// Execute the print command
pub async fn execute(format: OutputFormat) -> Result<()> {
    let manager = SessionManager::new(Tmux::new(DefaultCommander, TmuxOptions::default()));
    let config = manager
        .reflect()
        .await
        .context("Cannot read the current session")?;

    match format {
        OutputFormat::Text => print!("{}", serde_yaml::to_string(&config)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
