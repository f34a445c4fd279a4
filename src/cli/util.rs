// ABOUTME: Shared CLI helpers - config path resolution and loading
//
// --file wins, then the project name in the config directory, then
// ./.muxup.yml in the current directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use muxup::config::store::LOCAL_CONFIG_FILE;
use muxup::config::{load_config, Config, ConfigStore, ProcessEnv};

use super::ProjectArgs;

/// Config directory, created if missing
pub fn config_store() -> Result<ConfigStore> {
    let dir = ConfigStore::default_dir().context("Could not determine home directory")?;
    let store = ConfigStore::new(dir);
    store
        .init()
        .with_context(|| format!("Cannot initialize config dir at {}", store.dir().display()))?;
    Ok(store)
}

/// Every config file the project arguments refer to
pub fn config_paths(args: &ProjectArgs, store: &ConfigStore) -> Result<Vec<PathBuf>> {
    if let Some(file) = &args.file {
        return Ok(vec![file.clone()]);
    }
    if let Some(project) = args.project() {
        return Ok(store.find_configs(project)?);
    }
    Ok(vec![local_config()?])
}

/// `.muxup.yml` in the current directory
pub fn local_config() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Cannot read current directory")?;
    Ok(cwd.join(LOCAL_CONFIG_FILE))
}

/// Load a config; an empty `root` becomes the current directory
pub fn load(path: &Path, args: &ProjectArgs) -> Result<Config> {
    let mut config = load_config(path, &args.settings(), &ProcessEnv)?;
    if config.root.is_empty() {
        let cwd = std::env::current_dir().context("Cannot read current directory")?;
        config.root = cwd.to_string_lossy().into_owned();
    }
    Ok(config)
}
