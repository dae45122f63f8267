//! Parse HTTP response header lines into response metadata.

/// Content headers extracted from a response.
#[derive(Debug, Default)]
pub(crate) struct ParsedHeaders {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// Parse collected header lines.
///
/// A status line ("HTTP/...") resets the accumulated values, so when the
/// transport followed redirects and the lines span several responses, the
/// final response wins.
pub(crate) fn parse_headers(lines: &[String]) -> ParsedHeaders {
    let mut parsed = ParsedHeaders::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            parsed = ParsedHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                parsed.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    parsed.content_length = Some(n);
                }
            }
        }
    }
    parsed
}
