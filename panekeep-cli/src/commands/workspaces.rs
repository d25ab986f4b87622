//! List live workspaces command.

use panekeep_core::capture::list_workspaces;

use crate::error::CliError;
use crate::util::{Context, wezterm};

/// List workspaces command handler
pub fn cmd_workspaces(ctx: &Context) -> Result<(), CliError> {
    let host = wezterm(&ctx.settings);
    for name in list_workspaces(&host)? {
        println!("{name}");
    }
    Ok(())
}
