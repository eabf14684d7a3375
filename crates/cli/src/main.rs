//! sftp-loader - interactive SFTP file manager
//!
//! Uploads files, creates and deletes remote folders, and lists remote
//! directories over SFTP, one prompted command at a time.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sl_core::{Config, ConfigManager};
use sl_sftp::SftpConnector;

use sftp_loader::commands::Cli;
use sftp_loader::exit_code::ExitCode;
use sftp_loader::logging;
use sftp_loader::output::{Formatter, OutputConfig};
use sftp_loader::prompt::Prompter;
use sftp_loader::shell::{Shell, ShellOptions};

fn main() {
    let cli = Cli::parse();

    let (config, config_error) = match load_config(&cli) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let defaults = &config.defaults;

    let output = OutputConfig::resolve(cli.no_color, cli.no_progress, cli.quiet, defaults);
    let formatter = Formatter::new(output.clone());

    if cli.init_config {
        let exit_code = match (config_error, write_config(&cli, &config)) {
            (Some(e), _) => {
                formatter.error(&format!("Refusing to overwrite unreadable configuration: {e:#}"));
                ExitCode::GeneralError
            }
            (None, Ok(path)) => {
                formatter.success(&format!("Configuration written to {}", path.display()));
                ExitCode::Success
            }
            (None, Err(e)) => {
                formatter.error(&format!("{e:#}"));
                ExitCode::GeneralError
            }
        };
        std::process::exit(exit_code.into());
    }

    if let Some(e) = config_error {
        formatter.warning(&format!("Failed to load configuration, using defaults: {e:#}"));
    }

    logging::init(&defaults.log_dir);

    let connector = SftpConnector::new().with_timeout(defaults.timeout_ms);
    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let options = ShellOptions {
        port: defaults.port,
        invalid_input: defaults.invalid_input,
        output,
    };

    let exit_code = Shell::new(connector, prompter, options).run();
    tracing::debug!("Exiting: {exit_code}");
    std::process::exit(exit_code.into());
}

fn config_manager(cli: &Cli) -> sl_core::Result<ConfigManager> {
    match &cli.config {
        Some(path) => Ok(ConfigManager::with_path(path.clone())),
        None => ConfigManager::new(),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let manager = config_manager(cli)?;
    manager
        .load()
        .with_context(|| format!("reading {}", manager.config_path().display()))
}

fn write_config(cli: &Cli, config: &Config) -> anyhow::Result<PathBuf> {
    let manager = config_manager(cli)?;
    manager
        .save(config)
        .with_context(|| format!("writing {}", manager.config_path().display()))?;
    Ok(manager.config_path().clone())
}
