//! Global configuration loaded from the XDG config dir.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::DEFAULT_CHUNK_SIZE;
use crate::transport::CurlOptions;

/// Global configuration loaded from `~/.config/treedl/config.toml`.
/// Every field can be overridden from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDlConfig {
    /// Gitea base URL, e.g. `https://gitea.example.group`. No built-in default.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Entries per batch; also the peak number of concurrent blob requests.
    pub chunk_size: usize,
    /// Destination root used when none is given on the command line.
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for each GET.
    pub request_timeout_secs: u64,
    /// API token sent as `Authorization: token ...`. `TREEDL_TOKEN` takes precedence.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for TreeDlConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            download_dir: PathBuf::from("downloadfiles"),
            connect_timeout_secs: 15,
            request_timeout_secs: 120,
            token: None,
            user_agent: None,
        }
    }
}

impl TreeDlConfig {
    /// Curl settings for this config; `env_token` (from `TREEDL_TOKEN`) wins over the file.
    pub fn curl_options(&self, env_token: Option<String>) -> CurlOptions {
        let mut opts = CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.request_timeout_secs),
            token: env_token
                .filter(|t| !t.trim().is_empty())
                .or_else(|| self.token.clone()),
            ..CurlOptions::default()
        };
        if let Some(ua) = &self.user_agent {
            opts.user_agent = ua.clone();
        }
        opts
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("treedl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TreeDlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TreeDlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TreeDlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
