// ABOUTME: Behavioral tests for project resolution and config loading from disk
// Verifies lookup in the config directory, directory projects and ${NAME} expansion

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

use muxup::config::{load_config, ConfigStore, CONFIG_PATH_ENV, SESSION_ENV};
use muxup::MuxError;

fn write(dir: &TempDir, name: &str, content: &str) -> Result<()> {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// A directory project starts every config inside it, in name order
#[test]
fn test_directory_project_loads_every_config() -> Result<()> {
    let dir = TempDir::new()?;
    write(&dir, "work/20-web.yml", "session: web\n")?;
    write(&dir, "work/10-api.yaml", "session: api\n")?;
    let store = ConfigStore::new(dir.path());

    let sessions: Vec<String> = store
        .find_configs("work")?
        .iter()
        .map(|path| load_config(path, &HashMap::new(), &HashMap::<String, String>::new()))
        .map(|config| config.map(|c| c.session))
        .collect::<Result<_, _>>()?;

    assert_eq!(sessions, vec!["api", "web"]);
    Ok(())
}

/// Command-line settings fill placeholders before the environment does
#[test]
fn test_settings_and_environment_expand_placeholders() -> Result<()> {
    let dir = TempDir::new()?;
    write(
        &dir,
        "blog.yml",
        "session: ${name}\nroot: ${HOME}/blog\nwindows:\n  - name: ${missing}\n",
    )?;
    let store = ConfigStore::new(dir.path());
    let path = &store.find_configs("blog")?[0];

    let settings = HashMap::from([("name".to_string(), "my-blog".to_string())]);
    let env = HashMap::from([
        ("HOME".to_string(), "/home/me".to_string()),
        ("name".to_string(), "ignored".to_string()),
    ]);
    let config = load_config(path, &settings, &env)?;

    assert_eq!(config.session, "my-blog");
    assert_eq!(config.root, "/home/me/blog");
    assert_eq!(config.windows[0].name, "${missing}");
    assert_eq!(config.env[SESSION_ENV], "my-blog");
    assert_eq!(
        config.env[CONFIG_PATH_ENV],
        fs::canonicalize(path)?.to_string_lossy()
    );
    Ok(())
}

/// An unknown project is reported by name
#[test]
fn test_unknown_project_names_the_project() -> Result<()> {
    let dir = TempDir::new()?;
    let store = ConfigStore::new(dir.path());

    let err = store.find_configs("ghost").unwrap_err();
    assert!(matches!(err, MuxError::ConfigNotFound { .. }));
    assert!(err.to_string().contains("ghost"));
    Ok(())
}

/// `new` writes a template once and never overwrites an existing config
#[test]
fn test_create_does_not_overwrite() -> Result<()> {
    let dir = TempDir::new()?;
    write(&dir, "blog.yml", "session: mine\n")?;
    let store = ConfigStore::new(dir.path());
    let path = store.config_path("blog");

    assert!(!store.create(&path, "blog")?);
    assert_eq!(fs::read_to_string(&path)?, "session: mine\n");
    Ok(())
}
