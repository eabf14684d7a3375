//! sftp-loader CLI library
//!
//! This module exports the shell components for use in integration tests.

pub mod commands;
pub mod exit_code;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod shell;
