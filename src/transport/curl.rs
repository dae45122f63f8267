//! libcurl-backed transport.
//!
//! One `curl::easy::Easy` per call: `nobody(true)` for HEAD, header capture
//! for Content-Type/Content-Length, body capture for GET. Cookies persist
//! through the configured jar file.

use std::str;

use super::parse;
use super::{
    Method, ResponseInfo, Transport, TransportError, TransportExchange, TransportRequest,
};

/// Shipped [`Transport`] implementation over `curl::easy::Easy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        CurlTransport
    }
}

fn curl_err(e: curl::Error) -> TransportError {
    TransportError {
        code: e.code() as i32,
        message: e.to_string(),
    }
}

impl Transport for CurlTransport {
    fn perform(&self, request: &TransportRequest) -> Result<TransportExchange, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url).map_err(curl_err)?;
        easy.nobody(request.method == Method::Head).map_err(curl_err)?;
        easy.follow_location(request.follow_redirects)
            .map_err(curl_err)?;
        easy.max_redirections(request.max_redirects).map_err(curl_err)?;
        easy.connect_timeout(request.connect_timeout)
            .map_err(curl_err)?;
        easy.timeout(request.timeout).map_err(curl_err)?;
        easy.accept_encoding(&request.accept_encoding)
            .map_err(curl_err)?;

        if let Some(auth) = &request.auth {
            easy.username(&auth.username).map_err(curl_err)?;
            easy.password(&auth.password).map_err(curl_err)?;
        }

        // Some hosts only respond when a cookie can be sent back; read and
        // write the persistent jar on every call.
        if let Some(jar) = &request.cookie_jar {
            easy.cookie_file(jar).map_err(curl_err)?;
            easy.cookie_jar(jar).map_err(curl_err)?;
        }

        let mut list = curl::easy::List::new();
        for (name, value) in &request.headers {
            list.append(&format!("{}: {}", name.trim(), value.trim()))
                .map_err(curl_err)?;
        }
        if !request.headers.is_empty() {
            easy.http_headers(list).map_err(curl_err)?;
        }

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        header_lines.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(curl_err)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        let status_code = easy.response_code().map_err(curl_err)?;
        let effective_url = easy
            .effective_url()
            .map_err(curl_err)?
            .unwrap_or(&request.url)
            .to_string();

        let parsed = parse::parse_headers(&header_lines);
        let info = ResponseInfo {
            status_code,
            effective_url,
            content_type: parsed.content_type,
            content_length: parsed.content_length,
        };
        let body = match request.method {
            Method::Get => Some(body),
            Method::Head => None,
        };
        Ok(TransportExchange { info, body })
    }
}
