//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod config_cmd;
pub mod plugins;
pub mod sites;
pub mod stats;

use woo_core::StoresManager;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a store-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    manager: &StoresManager,
    site_id: Option<i64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Stats(args) => stats::handle(manager, site_id, args, global).await,
        Command::Plugins(args) => plugins::handle(manager, require_site(site_id)?, args, global).await,
        Command::Sites(args) => sites::handle(manager, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}

/// The selected site, or a usage error naming how to pick one.
pub fn require_site(site_id: Option<i64>) -> Result<i64, CliError> {
    site_id.ok_or(CliError::NoSite)
}
