//! MIME acceptance policy: category registry, acceptance spec, resolver.
//!
//! The caller declares what it is willing to receive as a set of category
//! tags ("images", "webpages", "all") and/or concrete MIME types
//! ("image/gif"); the resolver expands that into the concrete MIME types the
//! registry knows about.

mod registry;
mod resolve;

pub use registry::MimeRegistry;
pub use resolve::resolve;

use std::collections::BTreeSet;

/// Caller-declared set of acceptable category tags and/or MIME types.
///
/// The empty set is valid and means "accept nothing": it resolves to no MIME
/// types, so every content-type check fails until the set is repopulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptanceSpec {
    entries: BTreeSet<String>,
}

impl AcceptanceSpec {
    /// Spec from any collection of tags and/or concrete MIME types.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The construction default: webpage MIME types only.
    pub fn webpages() -> Self {
        Self::new(["webpages"])
    }

    /// Replaces the whole set.
    pub fn replace<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries = entries.into_iter().map(Into::into).collect();
    }

    /// Appends entries, keeping the existing ones.
    pub fn add<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
    }

    /// Empties the set; nothing is acceptable until repopulated.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the declared tags/MIME strings.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
