//! folder command - create a remote directory
//!
//! Unlike the other commands, a refused mkdir is reported and the session
//! carries on. Failing to connect still ends the run.

use std::io::{BufRead, Write};

use sl_core::ops::create_directory;
use sl_core::{Connector, RemotePath, with_session};

use super::{CommandContext, CommandError};
use crate::output::Formatter;

pub const NEW_DIR_PROMPT: &str = "New remote directory: ";

/// Execute the folder command
pub fn execute<C, R, W>(ctx: &mut CommandContext<'_, C, R, W>) -> Result<(), CommandError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let new_dir = RemotePath::new(ctx.prompter.ask(NEW_DIR_PROMPT)?);
    let formatter = Formatter::new(ctx.output.clone());
    let host = &ctx.credentials.host;

    with_session(ctx.connector, ctx.credentials, |store| {
        match create_directory(store, &new_dir) {
            Ok(()) => formatter.success(&format!("Folder '{new_dir}' created on {host}")),
            Err(e) => tracing::error!("Error creating folder '{new_dir}': {e}"),
        }
        Ok(())
    })
    .map_err(|e| CommandError::operation("Folder creation failed", e))
}
