//! sl-sftp: SFTP adapter for sftp-loader
//!
//! This crate provides the implementation of the RemoteStore and Connector
//! traits using the ssh2 crate. It is the only crate that directly depends
//! on an SSH library.

pub mod client;

pub use client::{SftpClient, SftpConnector};
