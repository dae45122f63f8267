//! Typed errors for declined or failed requests.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::transport::TransportError;

fn join_mimes(expected: &BTreeSet<String>) -> String {
    expected.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Why a probe or fetch yielded no body.
///
/// Policy rejections (death code, MIME, size) are expected outcomes, not
/// fatal conditions; transport failures are carried in the same type so a
/// caller can inspect the last error uniformly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    /// Response status matched the death policy.
    #[error("{code} error while trying to retrieve {url}")]
    DeathCode { code: u32, url: String },

    /// Declared content type is not in the resolved acceptable set.
    #[error("mime-type requirement not met: resource is {actual:?}, acceptable: {list}", list = join_mimes(.expected))]
    MimeMismatch {
        actual: String,
        expected: BTreeSet<String>,
    },

    /// Declared content length exceeds the configured ceiling.
    #[error("size limit reached: limit is {limit_kb} KiB, resource is {actual_kb} KiB")]
    SizeExceeded { limit_kb: u64, actual_kb: u64 },

    /// The transport call itself failed (connect, resolve, timeout, ...).
    #[error("transport error {code}: {message}")]
    Transport { code: i32, message: String },
}

impl From<TransportError> for AdmissionError {
    fn from(e: TransportError) -> Self {
        AdmissionError::Transport {
            code: e.code,
            message: e.message,
        }
    }
}
