//! Chunked concurrent download engine.
//!
//! Cuts the listing into contiguous batches of `chunk_size` entries. Each
//! batch first creates its directories inline, then materializes its blobs on
//! one scoped thread each and joins them all before the next batch starts, so
//! at most `chunk_size` requests are in flight at once. The first failure
//! stops the run after its batch has been joined.

mod blob;

pub use blob::{materialize, DigestResult};

use crate::api::{ApiEndpoint, RepoRef};
use crate::error::{FetchError, Result};
use crate::listing;
use crate::storage;
use crate::transport::Transport;
use crate::tree::{self, EntryKind, TreeEntry};
use std::path::Path;
use std::slice::Chunks;
use std::thread;

/// Default batch size (concurrent blob fetches per batch).
pub const DEFAULT_CHUNK_SIZE: usize = 3;

/// Splits `items` into contiguous batches of at most `chunk_size`, keeping order.
pub fn partition<T>(items: &[T], chunk_size: usize) -> Result<Chunks<'_, T>> {
    if chunk_size == 0 {
        return Err(FetchError::InvalidChunkSize);
    }
    Ok(items.chunks(chunk_size))
}

/// Materializes `entries` under `root`, batch by batch.
///
/// Paths and parent ordering are validated before anything is written (a
/// parent may also be a directory that already exists under `root`), and
/// `root` is created if missing. Returns one `DigestResult` per blob, in
/// listing order.
pub fn download<T: Transport + ?Sized>(
    transport: &T,
    entries: &[TreeEntry],
    chunk_size: usize,
    root: &Path,
) -> Result<Vec<DigestResult>> {
    let batches = partition(entries, chunk_size)?;
    tree::validate_listing(entries, root)?;
    storage::ensure_root(root)?;

    let batch_count = batches.len();
    let mut results = Vec::with_capacity(entries.len());
    for (index, batch) in batches.enumerate() {
        tracing::debug!(batch = index + 1, of = batch_count, size = batch.len(), "starting batch");
        let done = run_batch(transport, batch, root).map_err(|e| {
            tracing::error!(batch = index + 1, error = %e, "batch failed; stopping");
            e
        })?;
        results.extend(done);
    }
    tracing::info!(
        root = %root.display(),
        entries = entries.len(),
        files = results.len(),
        "download complete"
    );
    Ok(results)
}

/// Lists `repo` through `endpoint` and downloads the whole tree under `root`.
pub fn download_repo<T: Transport + ?Sized>(
    transport: &T,
    endpoint: &ApiEndpoint,
    repo: &RepoRef,
    chunk_size: usize,
    root: &Path,
) -> Result<Vec<DigestResult>> {
    let url = endpoint.tree_url(repo);
    let entries = listing::list_tree(transport, &url)?;
    download(transport, &entries, chunk_size, root)
}

/// One batch: directories inline in listing order, then all blobs concurrently.
/// Every spawned worker is joined even when a sibling fails.
fn run_batch<T: Transport + ?Sized>(
    transport: &T,
    batch: &[TreeEntry],
    root: &Path,
) -> Result<Vec<DigestResult>> {
    for entry in batch.iter().filter(|e| e.kind == EntryKind::Tree) {
        storage::create_dir(&entry.local_path(root))?;
        tracing::debug!(path = %entry.path, "created directory");
    }

    thread::scope(|s| {
        let mut handles = Vec::new();
        for entry in batch {
            match entry.kind {
                EntryKind::Blob => {
                    let dest = entry.local_path(root);
                    let handle =
                        s.spawn(move || materialize(transport, &entry.path, &dest, &entry.url));
                    handles.push((entry, handle));
                }
                EntryKind::Commit => {
                    tracing::warn!(path = %entry.path, "skipping submodule entry");
                }
                EntryKind::Tree => {}
            }
        }

        let mut first_err = None;
        let mut done = Vec::with_capacity(handles.len());
        for (entry, handle) in handles {
            let res = handle.join().unwrap_or_else(|_| {
                Err(FetchError::WorkerPanicked {
                    path: entry.path.clone(),
                })
            });
            match res {
                Ok(digest) => done.push(digest),
                Err(e) => {
                    tracing::error!(path = %entry.path, url = %entry.url, error = %e, "materialize failed");
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(done),
        }
    })
}
