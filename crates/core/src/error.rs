//! Error types for sl-core
//!
//! Provides a unified error type shared by the core operations, the SFTP
//! adapter and the interactive shell.

use thiserror::Error;

/// Result type alias for sl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sl-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials were rejected by the server
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Host or port unreachable
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Transport, channel or subsystem failure
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Local or remote target does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A file operation was aimed at a directory
    #[error("Is a directory: {0}")]
    IsADirectory(String),

    /// Unrecognized command, mode or answer
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

/// Coarse classification used in log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Connection,
    Protocol,
    NotFound,
    IsADirectory,
    InvalidInput,
    Other,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "AuthenticationError",
            Self::Connection => "ConnectionError",
            Self::Protocol => "ProtocolError",
            Self::NotFound => "NotFoundError",
            Self::IsADirectory => "IsADirectoryError",
            Self::InvalidInput => "InvalidInputError",
            Self::Other => "Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Get the taxonomy entry for this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth(_) => ErrorKind::Authentication,
            Error::Connection(_) => ErrorKind::Connection,
            Error::Protocol(_) => ErrorKind::Protocol,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::IsADirectory(_) => ErrorKind::IsADirectory,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Other,
        }
    }
}
