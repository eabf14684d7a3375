//! RemoteStore trait definition
//!
//! This trait defines the primitive operations of a remote file store.
//! It allows the operations and the shell to be decoupled from the SSH
//! library that actually speaks the protocol.

use std::path::Path;

use serde::Serialize;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::path::RemotePath;

/// Attributes returned by a remote stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileAttrs {
    /// Size in bytes
    pub size: Option<u64>,

    /// Modification time, seconds since the Unix epoch
    pub mtime: Option<u64>,

    /// Whether the path is a directory
    pub is_dir: bool,
}

impl FileAttrs {
    /// Attributes of a regular file
    pub fn file(size: u64, mtime: u64) -> Self {
        Self {
            size: Some(size),
            mtime: Some(mtime),
            is_dir: false,
        }
    }

    /// Attributes of a directory
    pub fn dir(mtime: u64) -> Self {
        Self {
            size: None,
            mtime: Some(mtime),
            is_dir: true,
        }
    }
}

/// One entry of a remote listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name (no directory component)
    pub name: String,

    /// Human-readable modification time
    pub modified: String,

    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// One data row of the CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    #[serde(rename = "File")]
    pub file: String,

    #[serde(rename = "Last Modified")]
    pub last_modified: String,
}

impl From<&DirectoryEntry> for ListingRow {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            file: entry.name.clone(),
            last_modified: entry.modified.clone(),
        }
    }
}

/// Primitive operations of an authenticated remote session
///
/// This trait is implemented by the SFTP adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteStore {
    /// Upload a local file to `remote`, verifying the transfer, and return
    /// the number of bytes written
    fn put(&self, local: &Path, remote: &RemotePath) -> Result<u64>;

    /// Remove a remote file
    fn remove(&self, path: &RemotePath) -> Result<()>;

    /// Create a remote directory
    fn mkdir(&self, path: &RemotePath) -> Result<()>;

    /// Remove an empty remote directory
    fn rmdir(&self, path: &RemotePath) -> Result<()>;

    /// Get attributes of a remote path
    fn stat(&self, path: &RemotePath) -> Result<FileAttrs>;

    /// List entry names of a remote directory, without `.` and `..`
    fn list_dir(&self, path: &RemotePath) -> Result<Vec<String>>;

    /// Release the transport and any channel on it
    fn close(&mut self) -> Result<()>;
}

/// Opens authenticated sessions to a remote store
pub trait Connector {
    type Store: RemoteStore;

    /// Establish transport and authenticate
    fn connect(&self, credentials: &Credentials) -> Result<Self::Store>;
}
