//! Delete a remote file or an empty remote directory

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::path::RemotePath;
use crate::traits::RemoteStore;

/// What the operator asked to delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    File,
    Folder,
}

impl FromStr for DeleteKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            other => Err(Error::InvalidInput(format!(
                "Invalid deletion type {other:?}; please enter 'file' or 'folder'."
            ))),
        }
    }
}

impl std::fmt::Display for DeleteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Folder => f.write_str("folder"),
        }
    }
}

/// Delete `path`
///
/// Files are checked first: a missing path or a directory is rejected
/// without removing anything. Folders go straight to the remote store, which
/// refuses non-empty directories.
pub fn delete<S>(store: &S, path: &RemotePath, kind: DeleteKind) -> Result<()>
where
    S: RemoteStore + ?Sized,
{
    match kind {
        DeleteKind::File => {
            let attrs = match store.stat(path) {
                Ok(attrs) => attrs,
                Err(Error::NotFound(_)) => {
                    tracing::error!("Remote file not found: {path}");
                    return Err(Error::NotFound(format!("{path} not found!")));
                }
                Err(e) => return Err(e),
            };
            if attrs.is_dir {
                tracing::error!("Remote path is a directory: {path}");
                return Err(Error::IsADirectory(format!("{path} is a directory!")));
            }
            store.remove(path)?;
            tracing::info!("File '{path}' deleted successfully.");
        }
        DeleteKind::Folder => {
            store.rmdir(path)?;
            tracing::info!("Folder '{path}' deleted successfully.");
        }
    }
    Ok(())
}
