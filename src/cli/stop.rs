// ABOUTME: CLI stop command - tear down a project's sessions or some of their windows

use anyhow::{Context, Result};

use muxup::session::{RuntimeContext, SessionManager};
use muxup::tmux::{DefaultCommander, Tmux};

use super::util::{config_paths, config_store, load};
use super::ProjectArgs;

/// Execute the stop command
pub async fn execute(args: ProjectArgs, debug: bool) -> Result<()> {
    let store = config_store()?;
    let paths = config_paths(&args, &store)?;
    let context = RuntimeContext::detect();
    let options = args.options(debug);

    if options.windows.is_empty() {
        println!("Terminating session...");
    } else {
        println!("Killing windows...");
    }

    for path in &paths {
        let config = load(path, &args)?;
        let manager = SessionManager::new(Tmux::new(DefaultCommander, config.tmux_options.clone()));
        manager
            .stop(&config, &options, context)
            .await
            .with_context(|| format!("Cannot stop session '{}'", config.session))?;
    }

    Ok(())
}
