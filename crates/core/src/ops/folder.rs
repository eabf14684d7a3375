//! Create a remote directory

use crate::error::Result;
use crate::path::RemotePath;
use crate::traits::RemoteStore;

/// Issue a single directory-creation request
///
/// Fails if the directory exists or its parent is missing; callers decide
/// whether that failure is fatal.
pub fn create_directory<S>(store: &S, remote_dir: &RemotePath) -> Result<()>
where
    S: RemoteStore + ?Sized,
{
    store.mkdir(remote_dir)?;
    tracing::info!("Folder '{remote_dir}' created.");
    Ok(())
}
