//! Configuration management
//!
//! This module handles loading and saving the sftp-loader
//! configuration file. The file is stored in TOML format at
//! `<config dir>/sftp-loader/config.toml`, or under `$SFTP_LOADER_CONFIG_DIR`
//! when that variable is set.
//!
//! Credentials are never part of the configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::credentials::DEFAULT_PORT;
use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SFTP_LOADER_CONFIG_DIR";

/// Default log directory, relative to the working directory
const DEFAULT_LOG_DIR: &str = "logs";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version; files from newer releases are rejected
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// How the shell treats an unrecognized command or view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidInputPolicy {
    /// Log the error and end the process with a failure status
    #[default]
    Exit,
    /// Log the error and ask again
    Reprompt,
}

/// Color mode for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Default settings for shell behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// SSH port used for every session
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory receiving the per-run log file
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Color mode
    #[serde(default)]
    pub color: ColorMode,

    /// Show a spinner while uploading
    #[serde(default = "default_true")]
    pub progress: bool,

    /// Policy for unrecognized commands and modes
    #[serde(default)]
    pub invalid_input: InvalidInputPolicy,

    /// Session timeout in milliseconds (0 leaves the transport default)
    #[serde(default)]
    pub timeout_ms: u32,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_dir: default_log_dir(),
            color: ColorMode::default(),
            progress: true,
            invalid_input: InvalidInputPolicy::default(),
            timeout_ms: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("sftp-loader"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// A file written by a newer schema version is rejected.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade sftp-loader.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }
}
