//! Command dispatch: bridges CLI args -> Coordinator -> output formatting.

pub mod check;
pub mod config_cmd;
pub mod device;
pub mod interfaces;
pub mod snapshot;
pub mod stats;

use std::sync::Arc;

use edgeswitch_core::{ControllerConfig, Coordinator, Snapshot};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a switch-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Check => check::handle(config, global).await,
        Command::Device => device::handle(&*fetch(config).await?, global),
        Command::Stats => stats::handle(&*fetch(config).await?, global),
        Command::Interfaces(args) => interfaces::handle(&*fetch(config).await?, &args, global),
        Command::Snapshot => snapshot::handle(&*fetch(config).await?, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Log in, run one refresh cycle, and log out.
async fn fetch(config: ControllerConfig) -> Result<Arc<Snapshot>, CliError> {
    let snapshot = Coordinator::oneshot(config, |c| async move { c.refresh().await }).await?;
    Ok(snapshot)
}
