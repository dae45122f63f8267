//! Response admission: ordered death-code, MIME, and size checks.
//!
//! Gates probe/fetch metadata against the caller's policy before a body may
//! be released. Pure given its inputs; never performs I/O.

mod error;

pub use error::AdmissionError;

use std::collections::BTreeSet;

use crate::transport::ResponseInfo;

/// HTTP status codes that force rejection regardless of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeathPolicy {
    /// No status code is terminal.
    None,
    /// A single terminal code.
    Code(u32),
    /// A set of terminal codes.
    Codes(BTreeSet<u32>),
}

impl Default for DeathPolicy {
    fn default() -> Self {
        DeathPolicy::Code(404)
    }
}

impl DeathPolicy {
    /// True if a response with this status must be rejected outright.
    pub fn is_terminal(&self, status_code: u32) -> bool {
        match self {
            DeathPolicy::None => false,
            DeathPolicy::Code(code) => *code == status_code,
            DeathPolicy::Codes(codes) => codes.contains(&status_code),
        }
    }
}

/// First segment of a Content-Type header, trimmed
/// ("text/html; charset=utf-8" -> "text/html").
fn essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

/// Validates a completed probe/fetch result against policy.
///
/// Ordered checks, first failure wins:
/// 1. death code — a terminal status short-circuits everything else;
/// 2. MIME — the content type's first `;`-segment must be a member of
///    `resolved`; a missing or empty content type always fails;
/// 3. size — a known declared length strictly greater than `limit_kb * 1024`
///    bytes fails; equal to the bound passes, unknown length passes.
pub fn validate(
    info: &ResponseInfo,
    death: &DeathPolicy,
    resolved: &BTreeSet<String>,
    limit_kb: u64,
) -> Result<(), AdmissionError> {
    if death.is_terminal(info.status_code) {
        return Err(AdmissionError::DeathCode {
            code: info.status_code,
            url: info.effective_url.clone(),
        });
    }

    let mime = info.content_type.as_deref().map(essence).unwrap_or("");
    if !resolved.contains(mime) {
        return Err(AdmissionError::MimeMismatch {
            actual: mime.to_string(),
            expected: resolved.clone(),
        });
    }

    if let Some(length) = info.content_length {
        let bound = limit_kb.saturating_mul(1024);
        if length > bound {
            return Err(AdmissionError::SizeExceeded {
                limit_kb,
                actual_kb: length / 1024,
            });
        }
    }

    Ok(())
}
