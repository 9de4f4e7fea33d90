//! In-memory transport for unit tests.

use crate::error::{FetchError, Result};
use crate::transport::Transport;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves fixed bodies by exact URL; unknown URLs answer 404.
/// Records every requested URL.
#[derive(Default)]
pub(crate) struct MapTransport {
    routes: HashMap<String, (u32, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl MapTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), (200, body.as_bytes().to_vec()));
        self
    }

    pub(crate) fn with_status(mut self, url: &str, status: u32) -> Self {
        self.routes.insert(url.to_string(), (status, Vec::new()));
        self
    }

    /// Blob endpoint returning `data` base64-encoded, Gitea style.
    pub(crate) fn with_blob(self, url: &str, data: &[u8]) -> Self {
        use base64::Engine as _;
        let content = base64::engine::general_purpose::STANDARD.encode(data);
        let body = format!(
            r#"{{"content": "{content}", "encoding": "base64", "size": {}, "sha": "x", "url": "{url}"}}"#,
            data.len()
        );
        self.with(url, &body)
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MapTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some((200, body)) => Ok(body.clone()),
            Some((status, _)) => Err(FetchError::Http {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Http {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
