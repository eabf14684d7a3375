//! view command - list a remote directory
//!
//! Three renderings of the same directory: a flat table, a CSV file, or a
//! recursive tree. Table and tree go to the shell's writer.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use sl_core::ops::{format_listing, list_contents};
use sl_core::{Connector, ListingRow, RemotePath, render_tree, with_session, write_csv};

use super::{CommandContext, CommandError};
use crate::output::Formatter;

pub const REMOTE_DIR_PROMPT: &str = "Remote directory to list: ";
pub const MODE_PROMPT: &str = "Type 'list' for flat listing, 'csv' for the lists' contents as a .csv, \
or 'tree' for full directory tree: ";
pub const CSV_PATH_PROMPT: &str = "Output csv file path: ";

/// How the listing is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Csv,
    Tree,
}

impl FromStr for ViewMode {
    type Err = sl_core::Error;

    fn from_str(s: &str) -> sl_core::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "csv" => Ok(Self::Csv),
            "tree" => Ok(Self::Tree),
            other => Err(sl_core::Error::InvalidInput(format!(
                "Invalid view mode {other:?}; please enter 'list', 'tree', or 'csv'."
            ))),
        }
    }
}

/// Execute the view command
pub fn execute<C, R, W>(ctx: &mut CommandContext<'_, C, R, W>) -> Result<(), CommandError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let remote_dir = RemotePath::new(ctx.prompter.ask(REMOTE_DIR_PROMPT)?);
    let mode: ViewMode = ctx
        .prompter
        .ask(MODE_PROMPT)?
        .parse()
        .map_err(CommandError::invalid)?;

    match mode {
        ViewMode::List => {
            let entries = with_session(ctx.connector, ctx.credentials, |store| {
                list_contents(store, &remote_dir)
            })
            .map_err(|e| CommandError::operation("Listing failed", e))?;

            let out = ctx.prompter.output();
            writeln!(out, "{}", format_listing(&entries))?;
            out.flush()?;
        }
        ViewMode::Csv => {
            let entries = with_session(ctx.connector, ctx.credentials, |store| {
                list_contents(store, &remote_dir)
            })
            .map_err(|e| CommandError::operation("Listing failed", e))?;

            let output = PathBuf::from(ctx.prompter.ask(CSV_PATH_PROMPT)?);
            let rows: Vec<ListingRow> = entries.iter().map(ListingRow::from).collect();
            let written =
                write_csv(&rows, &output).map_err(|e| CommandError::operation("CSV export failed", e))?;

            Formatter::new(ctx.output.clone())
                .success(&format!("Wrote {written} entries to {}", output.display()));
        }
        ViewMode::Tree => {
            let out = ctx.prompter.output();
            let stats = with_session(ctx.connector, ctx.credentials, |store| {
                render_tree(store, &remote_dir, out)
            })
            .map_err(|e| CommandError::operation("Tree rendering failed", e))?;

            tracing::debug!(
                "{} directories, {} files under {remote_dir}",
                stats.directories,
                stats.files
            );
        }
    }
    Ok(())
}
