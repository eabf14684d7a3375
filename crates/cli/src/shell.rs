//! Interactive shell
//!
//! Collects credentials, runs one command per loop iteration (each with its
//! own session), then asks whether to continue and whether to keep the
//! credentials. Typing `exit` anywhere ends the run successfully.

use std::io::{BufRead, Write};

use sl_core::{Connector, Credentials, DEFAULT_PORT, InvalidInputPolicy};

use crate::commands::{self, COMMAND_PROMPT, Command, CommandContext, CommandError};
use crate::exit_code::ExitCode;
use crate::output::OutputConfig;
use crate::prompt::Prompter;

pub const HOST_PROMPT: &str = "Host: ";
pub const USERNAME_PROMPT: &str = "Username: ";
pub const PASSWORD_PROMPT: &str = "Password: ";
pub const CONTINUE_PROMPT: &str = "Continue? (yes/no): ";
pub const SAME_CREDENTIALS_PROMPT: &str = "Proceed with the same sFTP credentials? (yes/no): ";

const BANNER: &str = r"
 ____  _____ _____ ____    _                    _
/ ___||  ___|_   _|  _ \  | |    ___   __ _  __| | ___ _ __
\___ \| |_    | | | |_) | | |   / _ \ / _` |/ _` |/ _ \ '__|
 ___) |  _|   | | |  __/  | |__| (_) | (_| | (_| |  __/ |
|____/|_|     |_| |_|     |_____\___/ \__,_|\__,_|\___|_|
";

/// Shell settings taken from the configuration
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Port used for every session
    pub port: u16,
    pub invalid_input: InvalidInputPolicy,
    pub output: OutputConfig,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            invalid_input: InvalidInputPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

/// The operator-facing loop
pub struct Shell<C, R, W> {
    connector: C,
    prompter: Prompter<R, W>,
    options: ShellOptions,
}

impl<C, R, W> Shell<C, R, W>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    pub fn new(connector: C, prompter: Prompter<R, W>, options: ShellOptions) -> Self {
        Self {
            connector,
            prompter,
            options,
        }
    }

    /// Run until the operator leaves or a command fails
    pub fn run(&mut self) -> ExitCode {
        match self.run_loop() {
            Ok(()) | Err(CommandError::Exit) => {
                tracing::info!("Goodbye!");
                ExitCode::Success
            }
            Err(CommandError::Operation { context, source }) => {
                tracing::error!("{context}: {source} ({})", source.kind());
                ExitCode::GeneralError
            }
            Err(e) => {
                tracing::error!("{e}");
                ExitCode::GeneralError
            }
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn run_loop(&mut self) -> Result<(), CommandError> {
        self.print_banner()?;
        let mut credentials = self.collect_credentials()?;

        loop {
            self.run_command(&credentials)?;

            let restart = self.prompter.ask(CONTINUE_PROMPT)?.to_lowercase();
            if restart == "no" {
                return Ok(());
            }

            let same = self.prompter.ask(SAME_CREDENTIALS_PROMPT)?.to_lowercase();
            match same.as_str() {
                "yes" => {}
                "no" => {
                    tracing::info!("Please reenter sFTP credentials:");
                    credentials = self.collect_credentials()?;
                }
                _ => tracing::error!(
                    "Invalid answer {same:?}; please enter 'yes' or 'no'. Keeping the current credentials."
                ),
            }
        }
    }

    /// Ask for a command and run it; re-asks on bad input when configured to
    fn run_command(&mut self, credentials: &Credentials) -> Result<(), CommandError> {
        loop {
            let result = self
                .prompter
                .ask(COMMAND_PROMPT)?
                .parse::<Command>()
                .map_err(CommandError::invalid)
                .and_then(|command| {
                    let mut ctx = CommandContext {
                        connector: &self.connector,
                        credentials,
                        prompter: &mut self.prompter,
                        output: &self.options.output,
                    };
                    commands::execute(command, &mut ctx)
                });

            match result {
                Err(CommandError::InvalidInput(msg))
                    if self.options.invalid_input == InvalidInputPolicy::Reprompt =>
                {
                    tracing::error!("{msg}");
                }
                other => return other,
            }
        }
    }

    fn collect_credentials(&mut self) -> Result<Credentials, CommandError> {
        let host = self.prompter.ask(HOST_PROMPT)?;
        let username = self.prompter.ask(USERNAME_PROMPT)?;
        let password = self.prompter.ask(PASSWORD_PROMPT)?;
        Ok(Credentials::new(host, username, password).with_port(self.options.port))
    }

    fn print_banner(&mut self) -> Result<(), CommandError> {
        if self.options.output.quiet {
            return Ok(());
        }
        let out = self.prompter.output();
        writeln!(out, "{BANNER}")?;
        writeln!(out, "sftp-loader {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Type 'exit' at any prompt to quit.")?;
        writeln!(out)?;
        Ok(())
    }
}
