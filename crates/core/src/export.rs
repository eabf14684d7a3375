//! CSV export of a flat listing

use std::path::Path;

use crate::error::Result;
use crate::traits::ListingRow;

/// Header row of the export
pub const CSV_HEADER: [&str; 2] = ["File", "Last Modified"];

/// Write `rows` to `output` in input order, after the header row
///
/// Missing parent directories are created and an existing file is
/// overwritten. Returns the number of data rows written.
pub fn write_csv(rows: &[ListingRow], output: &Path) -> Result<usize> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(output)?;

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} entries to {}", rows.len(), output.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(file: &str, last_modified: &str) -> ListingRow {
        ListingRow {
            file: file.to_string(),
            last_modified: last_modified.to_string(),
        }
    }

    #[test]
    fn test_write_csv_creates_parents() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("reports").join("2024").join("listing.csv");

        let written = write_csv(&[row("a.txt", "Jan 1"), row("b.txt", "Jan 2")], &output).unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "File,Last Modified\r\na.txt,Jan 1\r\nb.txt,Jan 2\r\n");
    }

    #[test]
    fn test_write_csv_empty_listing_keeps_header() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("empty.csv");

        assert_eq!(write_csv(&[], &output).unwrap(), 0);
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "File,Last Modified\r\n");
    }

    #[test]
    fn test_write_csv_overwrites() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("listing.csv");
        std::fs::write(&output, "stale contents that are longer than the new file\n").unwrap();

        write_csv(&[row("a.txt", "Jan 1")], &output).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "File,Last Modified\r\na.txt,Jan 1\r\n");
    }

    #[test]
    fn test_write_csv_quotes_fields() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("quoted.csv");

        write_csv(&[row("a,b.txt", "Mon Jan  1 00:00:00 2024")], &output).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["File,Last Modified", "\"a,b.txt\",Mon Jan  1 00:00:00 2024"]);
    }
}
