//! Delete snapshot command.

use crate::cli::Scope;
use crate::error::CliError;
use crate::util::Context;

/// Delete snapshot command handler
pub fn cmd_delete(ctx: &Context, name: &str, scope: Scope) -> Result<(), CliError> {
    if !ctx.store.delete(scope.into(), name)? {
        return Err(CliError::SnapshotNotFound {
            kind: scope.into(),
            name: name.to_string(),
        });
    }
    println!("Deleted {scope} snapshot '{name}'");
    Ok(())
}
