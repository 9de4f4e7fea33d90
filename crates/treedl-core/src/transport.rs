//! HTTP GET transport.
//!
//! The engine only needs `GET(url) -> body`. `CurlTransport` builds a fresh
//! libcurl Easy handle per request, so a single transport can be shared by
//! reference across the worker threads of a batch.

use crate::error::{FetchError, Result};
use std::time::Duration;

/// Issues independent GET requests and returns the response body.
///
/// Implementations must treat non-2xx responses as errors.
pub trait Transport: Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Per-request curl settings.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    /// Sent as `Authorization: token <value>` when set.
    pub token: Option<String>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(120),
            user_agent: concat!("treedl/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
        }
    }
}

/// libcurl-backed transport.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: CurlOptions,
}

impl CurlTransport {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &CurlOptions {
        &self.opts
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let curl_err = |source: curl::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        easy.connect_timeout(self.opts.connect_timeout)
            .map_err(curl_err)?;
        easy.timeout(self.opts.timeout).map_err(curl_err)?;
        easy.useragent(&self.opts.user_agent).map_err(curl_err)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json").map_err(curl_err)?;
        if let Some(token) = &self.opts.token {
            list.append(&format!("Authorization: token {}", token.trim()))
                .map_err(curl_err)?;
        }
        easy.http_headers(list).map_err(curl_err)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        let status = easy.response_code().map_err(curl_err)?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                url: url.to_string(),
                status,
            });
        }
        tracing::debug!(url, bytes = body.len(), "GET ok");
        Ok(body)
    }
}
