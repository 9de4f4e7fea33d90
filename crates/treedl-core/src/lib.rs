//! treedl core: list a Gitea repository tree and materialize it on disk in
//! bounded concurrent batches, logging a SHA-256 per file.

pub mod api;
pub mod checksum;
pub mod config;
pub mod downloader;
pub mod error;
pub mod listing;
pub mod logging;
pub mod storage;
pub mod transport;
pub mod tree;

#[cfg(test)]
mod testing;

pub use api::{ApiEndpoint, RepoRef};
pub use downloader::{download, download_repo, DigestResult};
pub use error::FetchError;
pub use transport::{CurlOptions, CurlTransport, Transport};
pub use tree::{EntryKind, TreeEntry};
