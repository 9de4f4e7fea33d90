//! `treedl fetch` – list the tree and download it in batches.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;
use treedl_core::config::TreeDlConfig;
use treedl_core::{download_repo, CurlTransport, DigestResult};

use super::env_token;
use crate::cli::RepoArgs;

pub async fn run_fetch(
    cfg: &TreeDlConfig,
    args: &RepoArgs,
    dest: PathBuf,
    chunk_size: usize,
    manifest: Option<&Path>,
) -> Result<()> {
    let endpoint = args.endpoint(cfg)?;
    let repo = args.repo_ref();
    let label = format!("{}/{}@{}", repo.owner, repo.repo, repo.reference);
    let transport = CurlTransport::new(cfg.curl_options(env_token()));
    tracing::info!(repo = %label, dest = %dest.display(), chunk_size, "fetch started");

    let started = Instant::now();
    let root = dest.clone();
    let results = tokio::task::spawn_blocking(move || {
        download_repo(&transport, &endpoint, &repo, chunk_size, &root)
    })
    .await
    .context("download task")?
    .with_context(|| format!("download {label} into {}", dest.display()))?;

    let lines = format_manifest(&results);
    print!("{lines}");
    if let Some(path) = manifest {
        std::fs::write(path, &lines)
            .with_context(|| format!("write manifest {}", path.display()))?;
    }
    tracing::info!(
        repo = %label,
        files = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fetch finished"
    );
    eprintln!(
        "Downloaded {} file(s) from {} into {} in {:.1}s",
        results.len(),
        label,
        dest.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

/// sha256sum-compatible lines: `<hex>  <path>\n`.
pub(crate) fn format_manifest(results: &[DigestResult]) -> String {
    results.iter().fold(String::new(), |mut out, r| {
        let _ = writeln!(out, "{}  {}", r.sha256, r.path);
        out
    })
}
