//! Minimal HTTP/1.1 server that answers GETs from a route table, for
//! integration tests of the curl transport against Gitea-shaped JSON.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

type Routes = Arc<Mutex<HashMap<String, (u16, String)>>>;

pub struct GiteaServer {
    base_url: String,
    routes: Routes,
    hits: Arc<Mutex<Vec<String>>>,
}

impl GiteaServer {
    /// Binds to an ephemeral port and serves in a background thread until the
    /// process exits. Unknown paths answer 404.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Routes = Arc::default();
        let hits: Arc<Mutex<Vec<String>>> = Arc::default();
        let (r, h) = (Arc::clone(&routes), Arc::clone(&hits));
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let (r, h) = (Arc::clone(&r), Arc::clone(&h));
                thread::spawn(move || handle(stream, &r, &h));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            routes,
            hits,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path_and_query` on this server.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    pub fn route(&self, path_and_query: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path_and_query.to_string(), (status, body.into()));
    }

    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &Routes, hits: &Arc<Mutex<Vec<String>>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut first = request.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let target = first.next().unwrap_or("").to_string();
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    hits.lock().unwrap().push(target.clone());
    let (status, body) = routes
        .lock()
        .unwrap()
        .get(&target)
        .cloned()
        .unwrap_or((404, r#"{"message": "not found"}"#.to_string()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}
