// ABOUTME: Config directory - finds, lists and creates project files
//
// Projects live in ~/.config/muxup as <project>.yml / <project>.yaml. A
// project may also be a directory of config files, started together.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MuxError, Result};

/// Recognized config file extensions, in lookup order
pub const EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Debug log file name inside the config directory
pub const LOG_FILE: &str = "muxup.log";

/// Project config used when no project and no file is given
pub const LOCAL_CONFIG_FILE: &str = ".muxup.yml";

/// One entry of `muxup list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub name: String,
    /// Configs inside a project directory
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.config/muxup`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("muxup"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Create the directory if needed
    pub fn init(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Path a new project config would be written to
    pub fn config_path(&self, project: &str) -> PathBuf {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{project}.{ext}")))
            .find(|path| path.is_file())
            .unwrap_or_else(|| self.dir.join(format!("{project}.{}", EXTENSIONS[0])))
    }

    /// Resolve a project to its config files
    ///
    /// A directory project yields every config inside it in name order.
    pub fn find_configs(&self, project: &str) -> Result<Vec<PathBuf>> {
        let project_dir = self.dir.join(project);
        if project_dir.is_dir() {
            let configs: Vec<PathBuf> = config_files(&project_dir)?
                .into_iter()
                .map(|name| project_dir.join(name))
                .collect();
            if configs.is_empty() {
                return Err(MuxError::ConfigNotFound {
                    project: project.to_string(),
                });
            }
            debug!("Project '{}' resolved to {} configs", project, configs.len());
            return Ok(configs);
        }

        let path = self.config_path(project);
        if path.is_file() {
            return Ok(vec![path]);
        }

        Err(MuxError::ConfigNotFound {
            project: project.to_string(),
        })
    }

    /// Every project in the directory, with directory projects expanded
    pub fn list(&self) -> Result<Vec<ConfigEntry>> {
        let mut entries = Vec::new();
        for entry in sorted_entries(&self.dir)? {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if path.is_dir() {
                let children = config_files(&path)?
                    .iter()
                    .map(|c| strip_extension(c))
                    .collect();
                entries.push(ConfigEntry { name, children });
            } else if has_config_extension(&path) {
                entries.push(ConfigEntry {
                    name: strip_extension(&name),
                    children: Vec::new(),
                });
            }
        }
        Ok(entries)
    }

    /// Write a starter config unless the file already exists.
    /// Returns true if a file was written.
    pub fn create(&self, path: &Path, session: &str) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, template(session))?;
        debug!("Created config {}", path.display());
        Ok(true)
    }
}

fn template(session: &str) -> String {
    format!(
        "session: {session}

root: ~/

before_start:
  - docker-compose -f my-microservices/docker-compose.yml up -d

stop:
  - docker stop $(docker ps -q)

windows:
  - name: code
    root: blog
    manual: true
    layout: main-vertical
    commands:
      - docker-compose start
    panes:
      - type: horizontal
        root: .
        commands:
          - docker-compose exec src npm i
          - docker-compose exec src npm start

  - name: infrastructure
    root: ~/
    layout: tiled
    panes:
      - type: horizontal
        root: .
        commands:
          - docker-compose up -d
          - docker-compose exec php /bin/sh
          - clear
"
    )
}

fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

/// Config file names directly inside `dir`, sorted
fn config_files(dir: &Path) -> Result<Vec<String>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|e| e.path().is_file() && has_config_extension(&e.path()))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect())
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

fn strip_extension(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map_or_else(|| name.to_string(), |stem| stem.to_string_lossy().into_owned())
}
