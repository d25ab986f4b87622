//! Command handler modules for the CLI.

mod delete;
mod list;
mod plan;
mod restore;
mod save;
mod show;
mod workspaces;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::Context;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(ctx: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Save {
            name,
            scope,
            pane,
            workspace,
        } => save::cmd_save(ctx, &name, scope, pane.as_deref(), workspace.as_deref()),
        Commands::Restore {
            name,
            scope,
            here,
            pane,
            workspace,
            dry_run,
        } => {
            if dry_run {
                return plan::cmd_plan(ctx, &name, scope, false, crate::cli::OutputFormat::Text);
            }
            restore::cmd_restore(
                ctx,
                &restore::RestoreParams {
                    name: &name,
                    scope,
                    here,
                    pane: pane.as_deref(),
                    workspace: workspace.as_deref(),
                },
            )
        }
        Commands::Plan {
            name,
            scope,
            simulate,
            format,
        } => plan::cmd_plan(ctx, &name, scope, simulate, format),
        Commands::List { scope, format } => list::cmd_list(ctx, scope, format),
        Commands::Show {
            name,
            scope,
            format,
        } => show::cmd_show(ctx, &name, scope, format),
        Commands::Delete { name, scope } => delete::cmd_delete(ctx, &name, scope),
        Commands::Workspaces => workspaces::cmd_workspaces(ctx),
    }
}
