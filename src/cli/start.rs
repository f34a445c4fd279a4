// ABOUTME: CLI start command - bring up every config of a project in order
//
// All configs but the last are started detached. A failed start is rolled
// back with a single stop of the same config.

use anyhow::{Context, Result};
use tracing::{error, info};

use muxup::session::{RuntimeContext, SessionManager};
use muxup::tmux::{DefaultCommander, Tmux};

use super::util::{config_paths, config_store, load};
use super::ProjectArgs;

/// Execute the start command
pub async fn execute(args: ProjectArgs, debug: bool) -> Result<()> {
    let store = config_store()?;
    let paths = config_paths(&args, &store)?;
    let context = RuntimeContext::detect();
    let mut options = args.options(debug);

    if options.windows.is_empty() {
        println!("Starting a new session...");
    } else {
        println!("Starting new windows...");
    }

    let last = paths.len().saturating_sub(1);
    for (index, path) in paths.iter().enumerate() {
        let config = load(path, &args)?;
        options.detach = options.detach || index != last;

        let manager = SessionManager::new(Tmux::new(DefaultCommander, config.tmux_options.clone()));
        info!("Starting '{}' from {}", config.session, path.display());

        if let Err(start_error) = manager.start(&config, &options, context).await {
            eprintln!("Oops, an error occurred! Rolling back...");
            error!("Start of '{}' failed: {}", config.session, start_error);
            if let Err(stop_error) = manager.stop(&config, &options, context).await {
                error!("Rollback of '{}' failed: {}", config.session, stop_error);
                eprintln!("Rollback failed: {stop_error}");
            }
            return Err(start_error)
                .with_context(|| format!("Cannot start session '{}'", config.session));
        }
    }

    Ok(())
}
