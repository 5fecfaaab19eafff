//! Document transport boundary.
//!
//! Implementations issue HEAD requests for probes and GET requests for full
//! retrievals against a resource path relative to the document origin.

use crate::Error;

/// Status and validators of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

impl ResponseMeta {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A fully retrieved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub meta: ResponseMeta,
    pub body: String,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Lightweight request returning only status and validators.
    ///
    /// `Err` means the request could not be completed at all; a 404 is `Ok`.
    async fn head(&self, resource_path: &str) -> Result<ResponseMeta, Error>;

    /// Full retrieval. Non-success statuses are reported through `meta.status`.
    async fn get(&self, resource_path: &str) -> Result<FetchedDocument, Error>;

    /// Whether requests carry a cache-busting parameter.
    fn cache_busting(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(ResponseMeta { status: 200, ..Default::default() }.is_success());
        assert!(ResponseMeta { status: 204, ..Default::default() }.is_success());
        assert!(!ResponseMeta { status: 304, ..Default::default() }.is_success());
        assert!(!ResponseMeta { status: 404, ..Default::default() }.is_success());
        assert!(!ResponseMeta::default().is_success());
    }
}
