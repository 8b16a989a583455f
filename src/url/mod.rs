//! Resource identifiers
//!
//! A [`ResourceId`] is the key type used across the crawler: it wraps a
//! normalized URL so that two identifiers compare equal iff they denote the
//! same logical resource.

mod normalize;

pub use normalize::normalize_url;

use crate::UrlResult;
use sha2::{Digest, Sha256};
use std::fmt;
use url::Url;

/// Opaque, comparable, hashable identifier for a fetchable resource.
///
/// Constructed only through [`ResourceId::parse`], which applies the
/// normalization rules in [`normalize_url`]. Identifiers are the keys of
/// both the resource store and the visited set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(Url);

impl ResourceId {
    /// Parses and normalizes a URL string into a resource identifier.
    pub fn parse(raw: &str) -> UrlResult<Self> {
        Ok(Self(normalize_url(raw)?))
    }

    /// The normalized URL backing this identifier.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The normalized URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Injective mapping from identifier to a filesystem/database-safe key.
    ///
    /// The key is the hex-encoded SHA-256 digest of the normalized URL, so
    /// distinct identifiers can never collide on the same stored entry.
    pub fn storage_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_str().as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let a = ResourceId::parse("https://EXAMPLE.com/page#section").unwrap();
        let b = ResourceId::parse("https://example.com/page").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_resources_differ() {
        let a = ResourceId::parse("https://example.com/a").unwrap();
        let b = ResourceId::parse("https://example.com/b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_storage_key_is_stable_hex() {
        let id = ResourceId::parse("https://example.com/page").unwrap();
        let key = id.storage_key();
        assert_eq!(key.len(), 64);
        assert_eq!(key, id.storage_key());
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_storage_key_differs_per_resource() {
        let a = ResourceId::parse("https://example.com/a").unwrap();
        let b = ResourceId::parse("https://example.com/b").unwrap();
        assert_ne!(a.storage_key(), b.storage_key());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(ResourceId::parse("ftp://example.com/file").is_err());
    }
}
