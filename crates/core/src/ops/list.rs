//! List a remote directory

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::error::Result;
use crate::path::RemotePath;
use crate::traits::{DirectoryEntry, RemoteStore};

/// `ctime`-style layout, e.g. `Thu Jan  1 00:00:00 1970`
const MTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Placeholder for entries the server reports without a modification time
const UNKNOWN_MTIME: &str = "-";

/// List `remote_dir`, sorted by name ascending
///
/// Every entry is stat'ed once. The listing is read fresh on each call.
pub fn list_contents<S>(store: &S, remote_dir: &RemotePath) -> Result<Vec<DirectoryEntry>>
where
    S: RemoteStore + ?Sized,
{
    let mut names = store.list_dir(remote_dir)?;
    names.sort();

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let attrs = store.stat(&remote_dir.join(&name))?;
        entries.push(DirectoryEntry {
            modified: attrs
                .mtime
                .map(format_mtime)
                .unwrap_or_else(|| UNKNOWN_MTIME.to_string()),
            name,
            is_dir: attrs.is_dir,
        });
    }

    tracing::debug!("Listed {} entries in {remote_dir}", entries.len());
    Ok(entries)
}

/// Format an epoch timestamp in the local time zone
pub fn format_mtime(secs: u64) -> String {
    format_mtime_in(secs, &TimeZone::system())
}

/// Format an epoch timestamp in `tz`
pub fn format_mtime_in(secs: u64, tz: &TimeZone) -> String {
    match i64::try_from(secs).ok().and_then(|s| Timestamp::from_second(s).ok()) {
        Some(ts) => ts.to_zoned(tz.clone()).strftime(MTIME_FORMAT).to_string(),
        None => UNKNOWN_MTIME.to_string(),
    }
}

/// Render the flat listing table
///
/// The name column is as wide as the longest name (or the `File` header).
pub fn format_listing(entries: &[DirectoryEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .chain(std::iter::once("File".len()))
        .max()
        .unwrap_or(0);

    let header = format!("{:<width$}   Last Modified", "File");
    let separator = "-".repeat(header.chars().count());

    let mut lines = vec![header, separator];
    lines.extend(
        entries
            .iter()
            .map(|e| format!("{:<width$}   {}", e.name, e.modified)),
    );
    lines.join("\n")
}
