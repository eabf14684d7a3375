//! Directory tree rendering
//!
//! Walks a remote directory depth-first and prints it with branch
//! connectors:
//!
//! ```text
//! /home/
//! ├── docs/
//! │   └── a.txt
//! └── z.txt
//! ```

use std::io::Write;

use crate::error::Result;
use crate::path::RemotePath;
use crate::traits::RemoteStore;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Counts gathered while rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
}

/// Render the tree under `root` to `out`
///
/// Each directory costs one listing plus one stat per entry. There is no
/// depth limit and no cycle detection.
pub fn render_tree<S, W>(store: &S, root: &RemotePath, out: &mut W) -> Result<TreeStats>
where
    S: RemoteStore + ?Sized,
    W: Write,
{
    let label = root.as_str().trim_end_matches('/');
    writeln!(out, "{label}/")?;

    let mut stats = TreeStats::default();
    walk(store, root, "", out, &mut stats)?;
    out.flush()?;
    Ok(stats)
}

fn walk<S, W>(
    store: &S,
    dir: &RemotePath,
    prefix: &str,
    out: &mut W,
    stats: &mut TreeStats,
) -> Result<()>
where
    S: RemoteStore + ?Sized,
    W: Write,
{
    let mut names = store.list_dir(dir)?;
    names.sort();

    let count = names.len();
    for (idx, name) in names.iter().enumerate() {
        let is_last = idx + 1 == count;
        let full = dir.join(name);
        let is_dir = store.stat(&full)?.is_dir;

        let branch = if is_last { LAST_BRANCH } else { BRANCH };
        let suffix = if is_dir { "/" } else { "" };
        writeln!(out, "{prefix}{branch}{name}{suffix}")?;

        if is_dir {
            stats.directories += 1;
            let extension = if is_last { SPACE_INDENT } else { PIPE_INDENT };
            walk(store, &full, &format!("{prefix}{extension}"), out, stats)?;
        } else {
            stats.files += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{FileAttrs, MockRemoteStore};
    use std::collections::BTreeMap;

    /// Builds a mock store from a map of directory -> children.
    fn mock_tree(dirs: Vec<(&str, Vec<&str>)>) -> MockRemoteStore {
        let listing: BTreeMap<String, Vec<String>> = dirs
            .into_iter()
            .map(|(dir, children)| {
                (
                    dir.to_string(),
                    children.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        let dir_set: Vec<String> = listing.keys().cloned().collect();

        let mut store = MockRemoteStore::new();
        store.expect_list_dir().returning(move |p| {
            listing
                .get(p.as_str())
                .cloned()
                .ok_or_else(|| Error::NotFound(p.to_string()))
        });
        store.expect_stat().returning(move |p| {
            if dir_set.iter().any(|d| d == p.as_str()) {
                Ok(FileAttrs::dir(0))
            } else {
                Ok(FileAttrs::file(1, 0))
            }
        });
        store
    }

    fn render(store: &MockRemoteStore, root: &str) -> (String, TreeStats) {
        let mut out = Vec::new();
        let stats = render_tree(store, &RemotePath::new(root), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_flat_connectors() {
        let store = mock_tree(vec![("/home", vec!["c", "a", "b"])]);
        let (out, stats) = render(&store, "/home");
        assert_eq!(out, "/home/\n├── a\n├── b\n└── c\n");
        assert_eq!(stats, TreeStats { directories: 0, files: 3 });
    }

    #[test]
    fn test_last_directory_children_use_spaces() {
        let store = mock_tree(vec![
            ("/home", vec!["a", "b", "c"]),
            ("/home/c", vec!["x", "y"]),
        ]);
        let (out, _) = render(&store, "/home");
        insta::assert_snapshot!(out.trim_end(), @r"
        /home/
        ├── a
        ├── b
        └── c/
            ├── x
            └── y
        ");
    }

    #[test]
    fn test_nested_tree() {
        let store = mock_tree(vec![
            ("/home", vec!["zeta.txt", "docs", "archive"]),
            ("/home/archive", vec!["2023"]),
            ("/home/archive/2023", vec!["q1.csv", "q2.csv"]),
            ("/home/docs", vec!["readme.md"]),
        ]);
        let (out, stats) = render(&store, "/home/");
        insta::assert_snapshot!(out.trim_end(), @r"
        /home/
        ├── archive/
        │   └── 2023/
        │       ├── q1.csv
        │       └── q2.csv
        ├── docs/
        │   └── readme.md
        └── zeta.txt
        ");
        assert_eq!(stats, TreeStats { directories: 3, files: 4 });
    }

    #[test]
    fn test_names_with_surrounding_whitespace() {
        let store = mock_tree(vec![
            ("/home", vec!["notes.txt ", "old "]),
            ("/home/old ", vec![" a"]),
        ]);
        let (out, stats) = render(&store, "/home");
        assert_eq!(out, "/home/\n├── notes.txt \n└── old /\n    └──  a\n");
        assert_eq!(stats, TreeStats { directories: 1, files: 2 });
    }

    #[test]
    fn test_empty_directory() {
        let store = mock_tree(vec![("/home", vec![])]);
        let (out, stats) = render(&store, "/home");
        assert_eq!(out, "/home/\n");
        assert_eq!(stats, TreeStats::default());
    }

    #[test]
    fn test_root_directory_label() {
        let store = mock_tree(vec![("/", vec!["home"]), ("/home", vec!["a"])]);
        let (out, _) = render(&store, "/");
        assert_eq!(out, "/\n└── home/\n    └── a\n");
    }

    #[test]
    fn test_listing_error_propagates() {
        let store = mock_tree(vec![("/home", vec!["a"])]);
        let mut out = Vec::new();
        let result = render_tree(&store, &RemotePath::new("/missing"), &mut out);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
