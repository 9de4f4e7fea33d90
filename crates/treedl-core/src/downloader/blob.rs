//! File Materializer: fetch one blob, decode, hash, write, log.

use crate::checksum;
use crate::error::{FetchError, Result};
use crate::storage;
use crate::transport::Transport;
use base64::Engine as _;
use serde::Deserialize;
use std::path::Path;

/// Body of `GET .../git/blobs/{sha}`; other fields are ignored.
#[derive(Debug, Deserialize)]
struct BlobContent {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

/// Path (relative to the download root) and SHA-256 of a written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    pub path: String,
    pub sha256: String,
}

/// Fetches `url`, decodes its base64 `content`, writes the raw bytes to
/// `dest`, and emits one `HASH <path>: <hex>` event.
pub fn materialize<T: Transport + ?Sized>(
    transport: &T,
    path: &str,
    dest: &Path,
    url: &str,
) -> Result<DigestResult> {
    let body = transport.get(url)?;
    let blob: BlobContent = serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })?;
    let data = decode_content(path, &blob)?;

    let sha256 = checksum::sha256_hex(&data);
    storage::write_file(dest, &data)?;

    tracing::info!(sha256 = %sha256, bytes = data.len(), "HASH {}: {}", path, sha256);
    Ok(DigestResult {
        path: path.to_string(),
        sha256,
    })
}

fn decode_content(path: &str, blob: &BlobContent) -> Result<Vec<u8>> {
    if let Some(enc) = blob.encoding.as_deref() {
        if !enc.eq_ignore_ascii_case("base64") {
            return Err(FetchError::UnsupportedEncoding {
                path: path.to_string(),
                encoding: enc.to_string(),
            });
        }
    }
    // Some forges wrap base64 at fixed columns.
    let compact: Vec<u8> = blob
        .content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let data = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })?;
    if let Some(expected) = blob.size {
        let actual = data.len() as u64;
        if actual != expected {
            return Err(FetchError::SizeMismatch {
                path: path.to_string(),
                expected,
                actual,
            });
        }
    }
    Ok(data)
}
