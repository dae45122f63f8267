//! HTTP transport contract and the libcurl-backed default implementation.
//!
//! The admission core never issues network calls itself; it consumes this
//! narrow blocking interface. One `perform` call per probe or fetch, no
//! retries at this layer. [`CurlTransport`] is the shipped implementation.

mod curl;
mod parse;

pub use self::curl::CurlTransport;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Request method: metadata-only probe or full body fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
}

/// Basic-auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Everything the transport needs to issue one HTTP call.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    /// Request headers, name -> value.
    pub headers: BTreeMap<String, String>,
    pub auth: Option<Credentials>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    /// Cookie file read and written across calls, when set.
    pub cookie_jar: Option<PathBuf>,
    /// Value for `Accept-Encoding` (e.g. "gzip,deflate").
    pub accept_encoding: String,
}

/// Metadata of a completed response, as the validator consumes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseInfo {
    /// Final HTTP status code.
    pub status_code: u32,
    /// URL after any redirects.
    pub effective_url: String,
    /// Raw `Content-Type` header, possibly with parameters.
    pub content_type: Option<String>,
    /// Declared `Content-Length` in bytes, if the server sent one.
    pub content_length: Option<u64>,
}

/// A completed exchange: response metadata plus the body for GET calls.
#[derive(Debug, Clone)]
pub struct TransportExchange {
    pub info: ResponseInfo,
    /// Response body; `None` for HEAD.
    pub body: Option<Vec<u8>>,
}

/// Low-level transport failure (resolve, connect, timeout, TLS, ...).
///
/// `code` carries the libcurl error code for curl-backed transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport error {code}: {message}")]
pub struct TransportError {
    pub code: i32,
    pub message: String,
}

/// Blocking HTTP collaborator used for both the probe and the fetch call.
pub trait Transport {
    fn perform(&self, request: &TransportRequest) -> Result<TransportExchange, TransportError>;
}
