//! Tree listing model and pre-flight validation.
//!
//! Entries come straight from the listing response. Before anything touches
//! the disk the downloader checks that every path is a safe relative path and
//! that every parent directory is either listed ahead of its children or
//! already present under the root, since batches are cut positionally and
//! never re-sorted.

use crate::error::{FetchError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Kind of a tree node as reported in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// File with fetchable content.
    Blob,
    /// Directory.
    Tree,
    /// Submodule pointer; has no content on this API.
    Commit,
}

/// One node of the remote file tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated path relative to the download root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Content address (blob endpoint); unused for directories.
    pub url: String,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl TreeEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            url: url.into(),
            sha: None,
            size: None,
        }
    }

    /// Parent directory path, or `None` for top-level entries.
    pub fn parent(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// Local destination under `root`.
    pub fn local_path(&self, root: &Path) -> PathBuf {
        self.path.split('/').fold(root.to_path_buf(), |p, c| p.join(c))
    }
}

/// Body of `GET .../git/trees/{ref}?recursive=true`.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeListing {
    pub tree: Vec<TreeEntry>,
    /// Set by the server when the listing was cut short.
    #[serde(default)]
    pub truncated: bool,
}

/// Rejects absolute paths, `..`/`.`/empty components, backslashes, and NUL.
pub fn validate_path(path: &str) -> Result<()> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.contains(['\\', '\0'])
        || path
            .split('/')
            .any(|c| c.is_empty() || c == "." || c == "..");
    if bad {
        return Err(FetchError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Checks all paths and that each entry's parent is a tree listed earlier
/// or an existing directory under `root`.
pub fn validate_listing(entries: &[TreeEntry], root: &Path) -> Result<()> {
    let mut dirs: HashSet<&str> = HashSet::new();
    for entry in entries {
        validate_path(&entry.path)?;
        if let Some(parent) = entry.parent() {
            if !dirs.contains(parent) && !local_dir_exists(root, parent) {
                return Err(FetchError::ParentNotListed {
                    path: entry.path.clone(),
                    parent: parent.to_string(),
                });
            }
        }
        if entry.kind == EntryKind::Tree {
            dirs.insert(entry.path.as_str());
        }
    }
    Ok(())
}

fn local_dir_exists(root: &Path, rel: &str) -> bool {
    rel.split('/').fold(root.to_path_buf(), |p, c| p.join(c)).is_dir()
}
