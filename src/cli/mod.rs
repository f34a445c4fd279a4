// ABOUTME: CLI argument parsing and command routing for muxup
//
// Provides command-line interface for:
// - Starting and stopping project sessions (start, stop)
// - Managing project configs (new, edit, list)
// - Dumping the current session as a config (print)
//
// A first argument that is not a known command is a project to start.

pub mod edit;
pub mod list;
pub mod print;
pub mod start;
pub mod stop;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

use muxup::session::Options;

/// Command names and aliases clap dispatches on
const COMMANDS: &[&str] = &[
    "start", "stop", "s", "st", "new", "n", "edit", "e", "list", "l", "print", "p", "help",
];

/// muxup - declarative tmux sessions
#[derive(Parser, Debug)]
#[command(name = "muxup")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Write debug logs to ~/.config/muxup/muxup.log
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for list and print
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a project session
    Start(ProjectArgs),

    /// Stop a project session, or some of its windows
    #[command(visible_aliases = ["s", "st"])]
    Stop(ProjectArgs),

    /// Create a project config and open it in the editor
    #[command(visible_alias = "n")]
    New(ProjectArgs),

    /// Open a project config in the editor
    #[command(visible_alias = "e")]
    Edit(ProjectArgs),

    /// List project configs
    #[command(visible_alias = "l")]
    List,

    /// Print the current session as a config
    #[command(visible_alias = "p")]
    Print,
}

/// Arguments shared by the project commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project name (`blog`, `blog:win1,win2`) followed by key=value settings
    #[arg(value_name = "PROJECT|KEY=VALUE")]
    pub args: Vec<String>,

    /// A custom path to a config file
    #[arg(short, long, env = "MUXUP_SESSION_CONFIG_PATH")]
    pub file: Option<PathBuf>,

    /// Windows to start or stop; with a running session they are added to it
    #[arg(short, long = "windows", value_name = "WINDOW")]
    pub windows: Vec<String>,

    /// Switch the client to the session even from inside tmux
    #[arg(short, long)]
    pub attach: bool,

    /// Do not attach to the session
    #[arg(long)]
    pub detach: bool,

    /// Create all windows inside the current session
    #[arg(short, long)]
    pub inside_current_session: bool,
}

impl ProjectArgs {
    /// Project name without its `:windows` suffix
    pub fn project(&self) -> Option<&str> {
        self.raw_project().map(|raw| split_project(raw).0)
    }

    fn raw_project(&self) -> Option<&str> {
        self.args
            .iter()
            .map(String::as_str)
            .find(|arg| !arg.contains('='))
    }

    /// `key=value` arguments; anything else is not a setting
    pub fn settings(&self) -> HashMap<String, String> {
        self.args
            .iter()
            .filter_map(|arg| arg.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// Engine options; a `project:win1,win2` selector replaces `--windows`
    pub fn options(&self, debug: bool) -> Options {
        let windows = match self.raw_project().map(split_project) {
            Some((_, Some(selected))) => selected,
            _ => self.windows.clone(),
        };

        Options {
            windows,
            attach: self.attach,
            detach: self.detach,
            debug,
            inside_current_session: self.inside_current_session,
            settings: self.settings(),
        }
    }
}

/// Split `project:win1,win2` into the project and its window list
pub fn split_project(raw: &str) -> (&str, Option<Vec<String>>) {
    match raw.split_once(':') {
        Some((project, windows)) => (
            project,
            Some(
                windows
                    .split(',')
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        ),
        None => (raw, None),
    }
}

/// Insert `start` when the first argument is neither a command nor a help or
/// version flag, so `muxup blog` means `muxup start blog`
pub fn with_default_command(args: Vec<OsString>) -> Vec<OsString> {
    let Some(first) = args.get(1).and_then(|a| a.to_str()) else {
        return args;
    };
    if COMMANDS.contains(&first) || matches!(first, "-h" | "--help" | "-V" | "--version") {
        return args;
    }

    let mut args = args;
    args.insert(1, OsString::from("start"));
    args
}
