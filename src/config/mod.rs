// ABOUTME: Project configuration for muxup
// Defines the session / window / pane model, ${NAME} expansion and loading from disk

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MuxError, Result};

pub mod env;
pub mod store;

pub use env::{Environment, ProcessEnv};
pub use store::ConfigStore;

/// Injected into every session: the session name
pub const SESSION_ENV: &str = "MUXUP_SESSION";

/// Injected into every session: absolute path of the config file
pub const CONFIG_PATH_ENV: &str = "MUXUP_SESSION_CONFIG_PATH";

lazy_static! {
    /// Matches ${NAME} placeholders
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// Declared target state of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Session name
    #[serde(default)]
    pub session: String,

    /// Base directory for every relative window / pane root
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root: String,

    /// Session environment, set right after the session is created
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Shell commands run once before a new session is created
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_start: Vec<String>,

    /// Shell commands run before the whole session is killed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<Window>,

    /// Delay in milliseconds before each send-keys call
    #[serde(default, skip_serializing_if = "is_zero")]
    pub sendkeys_timeout: u64,

    /// tmux server selection for every command issued for this config
    #[serde(default, skip_serializing_if = "TmuxOptions::is_default")]
    pub tmux_options: TmuxOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    #[serde(default)]
    pub name: String,

    /// Relative to the session root unless absolute
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root: String,

    /// Shell commands run in the window root before the window is created
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_start: Vec<String>,

    /// Typed into the first pane
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub panes: Vec<Pane>,

    /// tmux layout name, applied after all panes exist (default: even-horizontal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Only started when named explicitly
    #[serde(default, skip_serializing_if = "is_false")]
    pub manual: bool,

    /// Selected once the session is up
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    /// Relative to the window root unless absolute
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

/// Pane split orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Horizontal,
    Vertical,
}

/// tmux server selection (`-L`, `-S`, `-f`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
}

impl TmuxOptions {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Global tmux arguments selecting the server
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(name) = &self.socket_name {
            args.extend(["-L".to_string(), name.clone()]);
        }
        if let Some(path) = &self.socket_path {
            args.extend(["-S".to_string(), path.clone()]);
        }
        if let Some(file) = &self.config_file {
            args.extend(["-f".to_string(), file.clone()]);
        }
        args
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Replace `${NAME}` placeholders, preferring `settings` over `env`.
/// Placeholders with no binding are left untouched.
pub fn expand_variables(
    data: &str,
    settings: &HashMap<String, String>,
    env: &impl Environment,
) -> String {
    PLACEHOLDER_REGEX
        .replace_all(data, |caps: &Captures| {
            let name = &caps[1];
            settings
                .get(name)
                .cloned()
                .or_else(|| env.var(name))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand placeholders, then parse the YAML document
pub fn parse_config(
    data: &str,
    settings: &HashMap<String, String>,
    env: &impl Environment,
) -> std::result::Result<Config, serde_yaml::Error> {
    let expanded = expand_variables(data, settings, env);
    serde_yaml::from_str(&expanded)
}

/// Read, expand and parse a config file, then inject the session name and
/// the file's absolute path into `env`
pub fn load_config(
    path: &Path,
    settings: &HashMap<String, String>,
    env: &impl Environment,
) -> Result<Config> {
    let data = fs::read_to_string(path).map_err(|source| MuxError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = parse_config(&data, settings, env).map_err(|source| MuxError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.session.trim().is_empty() {
        return Err(MuxError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: "missing session name".to_string(),
        });
    }

    let absolute = fs::canonicalize(path)?;
    config
        .env
        .insert(SESSION_ENV.to_string(), config.session.clone());
    config.env.insert(
        CONFIG_PATH_ENV.to_string(),
        absolute.to_string_lossy().into_owned(),
    );

    debug!(
        "Loaded config for session '{}' from {}",
        config.session,
        absolute.display()
    );
    Ok(config)
}

/// Expand a leading `~` to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
