//! `treedl list` – print the tree listing.

use anyhow::{Context, Result};
use treedl_core::config::TreeDlConfig;
use treedl_core::listing::list_tree;
use treedl_core::{CurlTransport, EntryKind};

use super::env_token;
use crate::cli::RepoArgs;

pub async fn run_list(cfg: &TreeDlConfig, args: &RepoArgs) -> Result<()> {
    let url = args.endpoint(cfg)?.tree_url(&args.repo_ref());
    let transport = CurlTransport::new(cfg.curl_options(env_token()));
    let entries = tokio::task::spawn_blocking(move || list_tree(&transport, &url))
        .await
        .context("listing task")??;
    for entry in &entries {
        let kind = match entry.kind {
            EntryKind::Blob => "blob",
            EntryKind::Tree => "tree",
            EntryKind::Commit => "commit",
        };
        println!("{:<6} {}", kind, entry.path);
    }
    Ok(())
}
