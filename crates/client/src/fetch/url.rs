//! Request URL construction for document fetches.

use url::Url;

/// Error type for URL construction failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUSTER_PARAM: &str = "_cb";

/// Parse the document origin.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Require an http(s) scheme
/// 3. Remove fragment (#...)
/// 4. Ensure the path ends with `/` so resource paths resolve beneath it
pub fn parse_base(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_fragment(None);
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }

    Ok(parsed)
}

/// URL for `resource_path` under `base`, with `_cb=<millis>` appended when a
/// cache-busting timestamp is given.
pub fn resource_url(base: &Url, resource_path: &str, cache_buster: Option<i64>) -> Result<Url, UrlError> {
    if resource_path.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let mut url = base.join(resource_path).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    if let Some(millis) = cache_buster {
        url.query_pairs_mut().append_pair(CACHE_BUSTER_PARAM, &millis.to_string());
    }
    Ok(url)
}
