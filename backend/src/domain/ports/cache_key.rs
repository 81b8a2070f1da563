//! Key type for the search result cache.

use crate::domain::Coordinates;

/// Search cache key.
///
/// Built from [`Coordinates`] the key is always the canonical `x=<x>,y=<y>`
/// text, so equal points share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchCacheKey(String);

impl SearchCacheKey {
    /// Key for a search centred on `origin`.
    pub fn for_origin(origin: &Coordinates) -> Self {
        Self(origin.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for SearchCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SearchCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&Coordinates> for SearchCacheKey {
    fn from(value: &Coordinates) -> Self {
        Self::for_origin(value)
    }
}
