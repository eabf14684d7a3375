//! delete command - remove a remote file or an empty remote folder

use std::io::{BufRead, Write};

use sl_core::ops::{self, DeleteKind};
use sl_core::{Connector, RemotePath, with_session};

use super::{CommandContext, CommandError};
use crate::output::Formatter;

pub const KIND_PROMPT: &str = "File or Folder? ";
pub const PATH_PROMPT: &str = "Remote directory: ";

/// Execute the delete command
pub fn execute<C, R, W>(ctx: &mut CommandContext<'_, C, R, W>) -> Result<(), CommandError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let kind: DeleteKind = ctx
        .prompter
        .ask(KIND_PROMPT)?
        .parse()
        .map_err(CommandError::invalid)?;
    let path = RemotePath::new(ctx.prompter.ask(PATH_PROMPT)?);

    with_session(ctx.connector, ctx.credentials, |store| {
        ops::delete(store, &path, kind)
    })
    .map_err(|e| CommandError::operation("Deletion failed", e))?;

    tracing::info!("Deleted {kind} '{path}'");
    Formatter::new(ctx.output.clone()).success(&format!("Removed {kind} '{path}'"));
    Ok(())
}
