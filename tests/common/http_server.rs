//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body with a configurable status line, content type,
//! and declared length. Answers HEAD with headers only and GET with headers
//! plus the body; each connection carries one request.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Status line after "HTTP/1.1 ", e.g. "200 OK".
    pub status: String,
    /// Content-Type header value; omitted when `None`.
    pub content_type: Option<String>,
    /// Overrides the declared Content-Length (defaults to the body length).
    pub declared_length: Option<u64>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK".to_string(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            declared_length: None,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base
/// URL (e.g. "http://127.0.0.1:12345/"). Runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, ServerOptions::default())
}

/// Like `start` but with custom status/content-type/length behavior.
pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let body = Arc::new(body);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = Arc::clone(&opts);
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: &ServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");

    let declared = opts.declared_length.unwrap_or(body.len() as u64);
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        opts.status, declared
    );
    if let Some(content_type) = &opts.content_type {
        response.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    response.push_str("\r\n");

    if method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(body);
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
}
