// ABOUTME: Main entry point for muxup
//
// Binary: muxup
// Usage: muxup <command> [<project>] [flags] [<key>=<value>]...
// - start: create or attach to a project session (default command)
// - stop: stop the session or some of its windows
// - new / edit: create or open a project config
// - list: show project configs
// - print: dump the current session as a config

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;

use muxup::config::ConfigStore;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Cli::parse_from(cli::with_default_command(std::env::args_os().collect()));
    setup_logging(args.debug);

    match args.command {
        cli::Commands::Start(project) => cli::start::execute(project, args.debug).await,
        cli::Commands::Stop(project) => cli::stop::execute(project, args.debug).await,
        cli::Commands::New(project) => cli::edit::new(project).await,
        cli::Commands::Edit(project) => cli::edit::edit(project).await,
        cli::Commands::List => cli::list::execute(args.format),
        cli::Commands::Print => cli::print::execute(args.format).await,
    }
}

/// With `--debug`, JSON lines go to the log file in the config directory;
/// otherwise warnings go to stderr. `RUST_LOG` overrides either level.
fn setup_logging(debug: bool) {
    use std::fs::File;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if debug { "muxup=debug" } else { "muxup=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    let log_file = debug
        .then(|| {
            let store = ConfigStore::new(ConfigStore::default_dir()?);
            store.init().ok()?;
            File::create(store.log_file()).ok()
        })
        .flatten();

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(file)
                    .with_ansi(false),
            )
            .with(filter)
            .init(),
        None => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init(),
    }
}
