//! Fetchgate: guarded HTTP retrieval client.
//!
//! Probes a resource with a metadata-only HEAD request, gates the declared
//! content type and size against a caller-configured policy, and only then
//! transfers the body.

pub mod config;
pub mod logging;

pub mod admission;
pub mod client;
pub mod cookies;
pub mod mime;
pub mod transport;

pub use admission::{AdmissionError, DeathPolicy};
pub use client::{GuardedClient, Phase};
pub use config::ClientConfig;
pub use mime::{resolve, AcceptanceSpec, MimeRegistry};
pub use transport::{CurlTransport, ResponseInfo, Transport};
