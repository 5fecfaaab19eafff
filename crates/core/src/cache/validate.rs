//! Reuse decision for cached entries.

use super::store::CacheEntry;
use crate::Error;
use crate::transport::ResponseMeta;

/// Whether `cached` may be reused given the validators of a fresh probe.
///
/// An `ETag` match wins; otherwise a `Last-Modified` match; otherwise the
/// entry must be refetched.
pub fn is_reusable(cached: &CacheEntry, probed_etag: Option<&str>, probed_last_modified: Option<&str>) -> bool {
    if let Some(etag) = probed_etag
        && cached.etag.as_deref() == Some(etag)
    {
        return true;
    }

    if let Some(last_modified) = probed_last_modified
        && cached.last_modified.as_deref() == Some(last_modified)
    {
        return true;
    }

    false
}

/// Reuse decision from a probe outcome. A failed probe or one answered with a
/// non-success status never allows reuse, even when its validators match.
pub fn probe_allows_reuse(cached: &CacheEntry, probe: &Result<ResponseMeta, Error>) -> bool {
    match probe {
        Ok(meta) if meta.is_success() => is_reusable(cached, meta.etag.as_deref(), meta.last_modified.as_deref()),
        Ok(meta) => {
            tracing::debug!(status = meta.status, "validation probe returned non-success status");
            false
        }
        Err(e) => {
            tracing::debug!(error = %e, "validation probe failed");
            false
        }
    }
}
