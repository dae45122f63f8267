//! Expands an acceptance spec into the concrete MIME types it covers.

use std::collections::BTreeSet;

use super::{AcceptanceSpec, MimeRegistry};

/// Concrete MIME types covered by `spec` under `registry`.
///
/// A registry MIME type is included when the spec names it directly (exact
/// match, independent of its tags) or when the spec shares at least one
/// category tag with it; the two rules are applied independently and
/// unioned. Direct naming is registry-bounded: a MIME string the registry
/// does not know never resolves. Pure and side-effect free.
pub fn resolve(spec: &AcceptanceSpec, registry: &MimeRegistry) -> BTreeSet<String> {
    let mut resolved = BTreeSet::new();
    for (mime, tags) in registry.iter() {
        if spec.contains(mime) || tags.iter().any(|tag| spec.contains(tag)) {
            resolved.insert(mime.to_string());
        }
    }
    resolved
}
