//! Remote operations
//!
//! Each operation consumes an open [`RemoteStore`](crate::RemoteStore) and
//! performs one command's worth of work. None of them retries.

mod delete;
mod folder;
mod list;
mod upload;

pub use delete::{delete, DeleteKind};
pub use folder::create_directory;
pub use list::{format_listing, format_mtime, format_mtime_in, list_contents};
pub use upload::{resolve_local_file, upload, UploadReport};
