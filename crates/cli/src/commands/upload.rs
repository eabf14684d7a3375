//! upload command - send a local file into a remote directory
//!
//! The local path is checked before connecting, so a typo never opens a
//! session.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use humansize::{BINARY, format_size};
use sl_core::ops::{self, resolve_local_file};
use sl_core::{Connector, RemotePath, with_session};

use super::{CommandContext, CommandError};
use crate::output::{Formatter, ProgressBar};

pub const LOCAL_FILE_PROMPT: &str = "Local file to upload: ";
pub const REMOTE_DIR_PROMPT: &str = "Remote directory: ";

const FAILED: &str = "Upload failed";

/// Execute the upload command
pub fn execute<C, R, W>(ctx: &mut CommandContext<'_, C, R, W>) -> Result<(), CommandError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let local = PathBuf::from(ctx.prompter.ask(LOCAL_FILE_PROMPT)?);
    let remote_dir = RemotePath::new(ctx.prompter.ask(REMOTE_DIR_PROMPT)?);

    let local = resolve_local_file(&local).map_err(|e| CommandError::operation(FAILED, e))?;

    let spinner = ProgressBar::spinner(ctx.output, &format!("Uploading {}", local.display()));
    let result = with_session(ctx.connector, ctx.credentials, |store| {
        ops::upload(store, &local, &remote_dir)
    });
    spinner.finish_and_clear();

    let report = result.map_err(|e| CommandError::operation(FAILED, e))?;
    Formatter::new(ctx.output.clone()).success(&format!(
        "Uploaded {} to {} ({})",
        report.local.display(),
        report.remote,
        format_size(report.bytes, BINARY)
    ));
    Ok(())
}
