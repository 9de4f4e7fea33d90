//! Error type shared by the lister, downloader and materializer.
//!
//! Every variant is fatal to the run; nothing is retried.

use std::io;
use std::path::PathBuf;

/// Failure of a listing fetch, a blob materialization, or a pre-flight check.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (connect, timeout, TLS, ...).
    #[error("GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Response had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// Body was not valid JSON or did not match the expected shape.
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Blob response declared an encoding other than base64.
    #[error("unsupported content encoding {encoding:?} for {path}")]
    UnsupportedEncoding { path: String, encoding: String },

    /// `content` was not valid base64.
    #[error("invalid base64 content for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Decoded length disagrees with the size reported by the server.
    #[error("size mismatch for {path}: expected {expected} bytes, decoded {actual}")]
    SizeMismatch {
        path: String,
        expected: u64,
        actual: u64,
    },

    /// Directory creation or file write failed.
    #[error("{}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Something that is not a directory already occupies a tree entry's path.
    #[error("{} exists and is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Entry path is absolute, escapes the root, or has empty components.
    #[error("refusing unsafe entry path {path:?}")]
    InvalidPath { path: String },

    /// Entry's parent directory is neither listed before it nor present on disk.
    #[error("{path}: parent directory {parent:?} is not listed before it and does not exist")]
    ParentNotListed { path: String, parent: String },

    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    /// A materialization worker panicked.
    #[error("worker for {path} panicked")]
    WorkerPanicked { path: String },
}

impl FetchError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
