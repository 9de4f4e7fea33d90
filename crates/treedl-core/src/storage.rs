//! Filesystem primitives for materializing a tree.
//!
//! Files are written to a uniquely named temp file in the destination
//! directory, synced, and renamed into place, so a failed write never leaves
//! a half-written file under the final name. The temp name is created
//! exclusively, so it never clobbers another entry of the tree.

use crate::error::{FetchError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Prefix of in-flight temp files.
pub const TEMP_PREFIX: &str = ".treedl-";

/// Creates a single directory; the parent must already exist.
/// An existing directory is left alone; anything else at `path` is an error.
pub fn create_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if path.is_dir() {
                tracing::debug!(path = %path.display(), "directory already exists");
                Ok(())
            } else {
                Err(FetchError::NotADirectory {
                    path: path.to_path_buf(),
                })
            }
        }
        Err(e) => Err(FetchError::fs(path, e)),
    }
}

/// Creates the download root and any missing ancestors.
pub fn ensure_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(root).map_err(|e| FetchError::fs(root, e))?;
    tracing::info!(root = %root.display(), "created download root");
    Ok(())
}

/// Writes `data` to `final_path` (create or truncate) via a synced temp file
/// and rename. The temp file is removed on failure.
pub fn write_file(final_path: &Path, data: &[u8]) -> Result<()> {
    persist_new(final_path, data).map_err(|e| FetchError::fs(final_path, e))
}

fn persist_new(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match final_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX).suffix(".part");
    // Temp files default to 0600; downloaded files get regular file mode.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(final_path).map_err(|e| e.error)?;
    Ok(())
}
