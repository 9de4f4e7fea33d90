//! Gitea API endpoint construction.

use anyhow::{bail, Context, Result};
use url::Url;

/// Repository and git reference whose tree is listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    /// Branch, tag, or commit sha. `HEAD` selects the default branch.
    pub reference: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            reference: reference.into(),
        }
    }
}

/// Base URL of a Gitea instance (scheme, host, optional path prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    /// Parse a base URL such as `https://gitea.example.group` or
    /// `https://example.org/gitea/`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .with_context(|| format!("invalid API base URL {base_url:?}"))?;
        if !matches!(base.scheme(), "http" | "https") {
            bail!("API base URL must be http or https, got {}", base.scheme());
        }
        if base.cannot_be_a_base() {
            bail!("API base URL {base_url:?} cannot carry a path");
        }
        Ok(Self { base })
    }

    /// Expands a short domain name into the `https://gitea.<domain>.group` form.
    pub fn from_domain(domain: &str) -> Result<Self> {
        let domain = domain.trim();
        if domain.is_empty() || domain.contains(['/', ':', '?', '#']) {
            bail!("invalid domain name {domain:?}");
        }
        Self::new(&format!("https://gitea.{domain}.group"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET {base}/api/v1/repos/{owner}/{repo}/git/trees/{ref}?recursive=true`
    pub fn tree_url(&self, repo: &RepoRef) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "api",
                "v1",
                "repos",
                repo.owner.as_str(),
                repo.repo.as_str(),
                "git",
                "trees",
                repo.reference.as_str(),
            ]);
        }
        url.set_query(Some("recursive=true"));
        url.to_string()
    }
}
