// ABOUTME: CLI new/edit commands - create or open a project config in the editor

use anyhow::{anyhow, bail, Result};
use std::path::Path;

use muxup::config::ProcessEnv;
use muxup::editors::{open_in_editor, resolve_editor};
use muxup::tmux::DefaultCommander;

use super::util::{config_paths, config_store, local_config};
use super::ProjectArgs;

/// Execute the new command: write a starter config if needed, then edit it
pub async fn new(args: ProjectArgs) -> Result<()> {
    let store = config_store()?;
    let path = match (&args.file, args.project()) {
        (Some(file), _) => file.clone(),
        (None, Some(project)) => store.config_path(project),
        (None, None) => local_config()?,
    };

    let session = args
        .project()
        .map(str::to_string)
        .or_else(|| default_session_name(&path))
        .unwrap_or_else(|| "muxup".to_string());

    if store.create(&path, &session)? {
        println!("Created {}", path.display());
    }
    open(&path).await
}

/// Execute the edit command on an existing config
pub async fn edit(args: ProjectArgs) -> Result<()> {
    let store = config_store()?;
    let paths = config_paths(&args, &store)?;
    let [path] = paths.as_slice() else {
        bail!("Cannot edit or create multiple configurations at once");
    };
    open(path).await
}

async fn open(path: &Path) -> Result<()> {
    let editor = resolve_editor(&ProcessEnv)
        .ok_or_else(|| anyhow!("No editor found. Set $EDITOR to edit {}", path.display()))?;
    open_in_editor(&DefaultCommander, &editor, path).await?;
    Ok(())
}

/// Directory name for `.muxup.yml`, otherwise the file stem
fn default_session_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    if stem.starts_with('.') {
        return path
            .parent()?
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
    }
    Some(stem.into_owned())
}
