//! `treedl checksum <path>` – SHA-256 of a local file.

use anyhow::Result;
use std::path::Path;
use treedl_core::checksum;

/// Prints `<sha256>  <path>`, the same line format `fetch` prints per file.
pub async fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::sha256_path(path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
