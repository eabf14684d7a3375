//! Shell commands and process flags
//!
//! Each operator command lives in its own module and runs against one
//! freshly opened session. Commands return a [`CommandError`] that the shell
//! turns into a log line and an exit decision.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use sl_core::{Connector, Credentials};
use thiserror::Error;

use crate::output::OutputConfig;
use crate::prompt::{PromptError, Prompter};

mod delete;
mod folder;
mod upload;
mod view;

pub use view::ViewMode;

/// sftp-loader - interactive SFTP file manager
///
/// Prompts for credentials, then uploads files, creates and deletes remote
/// folders, and lists remote directories as a table, a CSV file or a tree.
/// Type `exit` at any prompt to quit.
#[derive(Parser, Debug)]
#[command(name = "sftp-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH", env = "SFTP_LOADER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Disable the upload spinner
    #[arg(long, default_value = "false")]
    pub no_progress: bool,

    /// Suppress the banner and success messages
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Write the current settings to the configuration file and exit
    #[arg(long, default_value = "false")]
    pub init_config: bool,
}

/// Prompt asking for the next command
pub const COMMAND_PROMPT: &str = "Type 'upload' to send a file, 'folder' to make a new folder, \
'delete' to remove either or 'view' to list all files within the server: ";

/// One operator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Upload,
    Folder,
    Delete,
    View,
}

impl FromStr for Command {
    type Err = sl_core::Error;

    fn from_str(s: &str) -> sl_core::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "upload" => Ok(Self::Upload),
            "folder" => Ok(Self::Folder),
            "delete" => Ok(Self::Delete),
            "view" => Ok(Self::View),
            other => Err(sl_core::Error::InvalidInput(format!(
                "Invalid choice {other:?}; please enter 'upload', 'delete', 'folder' or 'view'."
            ))),
        }
    }
}

/// Why a command stopped early
#[derive(Debug, Error)]
pub enum CommandError {
    /// The operator asked to leave
    #[error("exit requested")]
    Exit,

    /// Unrecognized command or sub-mode
    #[error("{0}")]
    InvalidInput(String),

    /// A remote or local operation failed
    #[error("{context}: {source}")]
    Operation {
        context: &'static str,
        #[source]
        source: sl_core::Error,
    },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    pub fn operation(context: &'static str, source: sl_core::Error) -> Self {
        Self::Operation { context, source }
    }

    /// Map a parse failure into an invalid-input error
    pub fn invalid(error: sl_core::Error) -> Self {
        match error {
            sl_core::Error::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl From<PromptError> for CommandError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::Exit => Self::Exit,
            PromptError::Io(e) => Self::Io(e),
        }
    }
}

/// Everything a command needs for one run
pub struct CommandContext<'a, C, R, W> {
    pub connector: &'a C,
    pub credentials: &'a Credentials,
    pub prompter: &'a mut Prompter<R, W>,
    pub output: &'a OutputConfig,
}

/// Run `command`, opening its own session
pub fn execute<C, R, W>(command: Command, ctx: &mut CommandContext<'_, C, R, W>) -> Result<(), CommandError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    tracing::debug!("Running {command:?} against {}", ctx.credentials.address());
    match command {
        Command::Upload => upload::execute(ctx),
        Command::Folder => folder::execute(ctx),
        Command::Delete => delete::execute(ctx),
        Command::View => view::execute(ctx),
    }
}
