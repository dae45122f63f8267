//! MIME category registry.
//!
//! Maps concrete MIME types ("image/gif") to the category tags they belong
//! to ("all", "gif", "image", "images"). The table is fixed after
//! construction; a custom table can be installed wholesale for testing or
//! customization, but never mutated in place.

use std::collections::{BTreeMap, BTreeSet};

/// Built-in MIME type -> category tags groupings.
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    ("application/json", &["all", "javascript", "js", "json", "text"]),
    ("application/x-javascript", &["all", "javascript", "js", "text"]),
    (
        "application/xhtml+xml",
        &["all", "text", "webpage", "webpages", "xhtml", "xml"],
    ),
    ("application/xml", &["all", "text", "xml"]),
    ("image/bmp", &["all", "bmp", "image", "images"]),
    ("image/gif", &["all", "gif", "image", "images"]),
    ("image/jpeg", &["all", "image", "images", "jpeg", "jpg"]),
    ("image/jpg", &["all", "image", "images", "jpeg", "jpg"]),
    ("image/pjpeg", &["all", "image", "images", "jpeg", "jpg"]),
    ("image/png", &["all", "image", "images", "png"]),
    ("image/vnd.microsoft.icon", &["all", "image", "images"]),
    ("image/x-icon", &["all", "image", "images"]),
    ("image/x-bitmap", &["all", "image", "images"]),
    ("text/css", &["all", "css", "text"]),
    ("text/html", &["all", "html", "text", "webpage", "webpages"]),
    ("text/plain", &["all", "text"]),
    ("text/javascript", &["all", "javascript", "js", "text"]),
    ("text/x-javascript", &["all", "javascript", "js", "text"]),
    ("text/x-json", &["all", "javascript", "js", "json", "text"]),
];

/// Registry of MIME type -> category tags.
///
/// `Default` builds the built-in table; [`MimeRegistry::with_table`] installs
/// a custom mapping. Read-only during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeRegistry {
    table: BTreeMap<String, BTreeSet<String>>,
}

impl Default for MimeRegistry {
    fn default() -> Self {
        let table = DEFAULT_TABLE
            .iter()
            .map(|(mime, tags)| {
                let tags = tags.iter().map(|t| (*t).to_string()).collect();
                ((*mime).to_string(), tags)
            })
            .collect();
        Self { table }
    }
}

impl MimeRegistry {
    /// Registry over a caller-supplied table, replacing the built-in one.
    pub fn with_table(table: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { table }
    }

    /// Category tags for a MIME type; empty when the type is unknown.
    pub fn tags_of(&self, mime: &str) -> BTreeSet<String> {
        self.table.get(mime).cloned().unwrap_or_default()
    }

    /// True if `mime` is one of the registry keys.
    pub fn contains(&self, mime: &str) -> bool {
        self.table.contains_key(mime)
    }

    /// The full set of registry MIME types.
    pub fn mimes(&self) -> BTreeSet<String> {
        self.table.keys().cloned().collect()
    }

    /// Iterates over (MIME type, tags) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.table.iter().map(|(mime, tags)| (mime.as_str(), tags))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
