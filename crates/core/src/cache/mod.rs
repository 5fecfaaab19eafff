//! In-memory document cache with validator-based reuse.
//!
//! - Entries keyed by resource path, fingerprinted with a rolling hash
//! - Lazy expiry on read, oldest-first eviction on write
//! - Reuse decided by `ETag` / `Last-Modified` probes

pub mod hash;
pub mod store;
pub mod validate;

pub use hash::ContentHash;
pub use store::{CacheConfig, CacheEntry, CacheStore};
pub use validate::{is_reusable, probe_allows_reuse};
