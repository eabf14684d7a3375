//! sl-core: Core library for the sftp-loader interactive SFTP client
//!
//! This crate provides the core functionality for sftp-loader, including:
//! - Configuration management
//! - Credentials and remote path handling
//! - The RemoteStore/Connector traits and scoped sessions
//! - Upload, create-directory, delete and list operations
//! - Tree rendering and CSV export
//!
//! This crate is independent of any SSH library, so every operation can be
//! exercised against a mocked or in-memory store.

pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod ops;
pub mod path;
pub mod session;
pub mod traits;
pub mod tree;

pub use config::{ColorMode, Config, ConfigManager, InvalidInputPolicy};
pub use credentials::{Credentials, DEFAULT_PORT};
pub use error::{Error, ErrorKind, Result};
pub use export::write_csv;
pub use path::RemotePath;
pub use session::{with_session, Session};
pub use traits::{Connector, DirectoryEntry, FileAttrs, ListingRow, RemoteStore};
pub use tree::{render_tree, TreeStats};
