//! CLI for treedl.

mod commands;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use treedl_core::config::{self, TreeDlConfig};
use treedl_core::{ApiEndpoint, RepoRef};

use commands::{run_checksum, run_fetch, run_list};

/// Top-level CLI for treedl.
#[derive(Debug, Parser)]
#[command(name = "treedl")]
#[command(about = "treedl: download a Gitea repository tree with per-file SHA-256", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which repository and which Gitea instance.
#[derive(Debug, Args)]
pub struct RepoArgs {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Branch, tag, or commit to list.
    #[arg(long = "ref", default_value = "HEAD", value_name = "REF")]
    pub reference: String,

    /// Gitea base URL, e.g. https://gitea.example.group.
    #[arg(long, conflicts_with = "domain", value_name = "URL")]
    pub base_url: Option<String>,

    /// Short domain name, expanded to https://gitea.<NAME>.group.
    #[arg(long, value_name = "NAME")]
    pub domain: Option<String>,
}

impl RepoArgs {
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.owner, &self.repo, &self.reference)
    }

    /// `--base-url`, then `--domain`, then `base_url` from config.
    pub fn endpoint(&self, cfg: &TreeDlConfig) -> Result<ApiEndpoint> {
        if let Some(url) = &self.base_url {
            return ApiEndpoint::new(url);
        }
        if let Some(domain) = &self.domain {
            return ApiEndpoint::from_domain(domain);
        }
        match &cfg.base_url {
            Some(url) => ApiEndpoint::new(url),
            None => bail!(
                "no Gitea base URL: pass --base-url or --domain, or set base_url in {}",
                config::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            ),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the repository tree, printing the SHA-256 of every file.
    Fetch {
        #[command(flatten)]
        repo: RepoArgs,

        /// Destination root folder (created if missing).
        #[arg(long, short = 'o', value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Entries per batch; at most this many files are fetched at once.
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        chunk_size: Option<u32>,

        /// Also write `<sha256>  <path>` lines to this file.
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Print the tree listing without downloading.
    List {
        #[command(flatten)]
        repo: RepoArgs,
    },

    /// Compute SHA-256 of a local file (e.g. to audit a download).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                repo,
                dest,
                chunk_size,
                manifest,
            } => {
                let chunk_size = chunk_size.map_or(cfg.chunk_size, |n| n as usize);
                let dest = dest.unwrap_or_else(|| cfg.download_dir.clone());
                run_fetch(&cfg, &repo, dest, chunk_size, manifest.as_deref()).await?;
            }
            CliCommand::List { repo } => run_list(&cfg, &repo).await?,
            CliCommand::Checksum { path } => run_checksum(std::path::Path::new(&path)).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
