//! Upload a local file into a remote directory

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::RemotePath;
use crate::traits::RemoteStore;

/// Outcome of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// Resolved local source
    pub local: PathBuf,
    /// Remote file written
    pub remote: RemotePath,
    /// Bytes transferred
    pub bytes: u64,
}

/// Expand a leading `~`, resolve the path, and require a regular file
pub fn resolve_local_file(path: &Path) -> Result<PathBuf> {
    let expanded = expand_home(path);

    let resolved = match std::fs::canonicalize(&expanded) {
        Ok(p) => p,
        Err(_) => {
            tracing::error!(
                "File path is not valid or isn't a file: {}",
                expanded.display()
            );
            return Err(Error::NotFound(format!(
                "{} not found or not a file",
                expanded.display()
            )));
        }
    };

    if !resolved.is_file() {
        tracing::error!(
            "File path is not valid or isn't a file: {}",
            resolved.display()
        );
        return Err(Error::NotFound(format!(
            "{} not found or not a file",
            resolved.display()
        )));
    }

    Ok(resolved)
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Upload `local` to `remote_dir/<file name of local>`
///
/// The remote file is created or overwritten. The store verifies the
/// transfer before returning.
pub fn upload<S>(store: &S, local: &Path, remote_dir: &RemotePath) -> Result<UploadReport>
where
    S: RemoteStore + ?Sized,
{
    let local = resolve_local_file(local)?;
    tracing::info!("Paths found and valid, starting upload.");

    let file_name = local
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| Error::NotFound(format!("{} has no file name", local.display())))?;
    let remote = remote_dir.join(&file_name);

    tracing::info!("Uploading {} → {}", local.display(), remote_dir);
    let bytes = store.put(&local, &remote)?;
    tracing::info!("Upload completed successfully.");

    Ok(UploadReport {
        local,
        remote,
        bytes,
    })
}
