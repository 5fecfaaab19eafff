//! Bounded, time-aware document cache.
//!
//! Content entries and their fingerprints live in two maps that are always
//! mutated together: a key present in one is present in the other.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::hash::ContentHash;
use crate::clock::Clock;

/// Cache store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries older than this are dropped on read (default: 5 minutes).
    pub timeout: Duration,
    /// Upper bound on stored entries (default: 50).
    pub max_entries: usize,
    /// When false the store never returns or records anything.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_millis(300_000), max_entries: 50, enabled: true }
    }
}

/// A cached document body with the validators it was served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub content: Arc<str>,
    pub content_hash: ContentHash,
    pub inserted_at: DateTime<Utc>,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub stale: bool,
}

impl CacheEntry {
    pub fn new(
        content: impl Into<Arc<str>>, etag: Option<String>, last_modified: Option<String>, inserted_at: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        let content_hash = ContentHash::of(&content);
        Self { content, content_hash, inserted_at, etag, last_modified, stale: false }
    }
}

#[derive(Debug)]
struct Slot {
    entry: CacheEntry,
    seq: u64,
}

/// In-memory cache keyed by resource path.
pub struct CacheStore {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    entries: HashMap<String, Slot>,
    hashes: HashMap<String, ContentHash>,
    next_seq: u64,
}

impl CacheStore {
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock, entries: HashMap::new(), hashes: HashMap::new(), next_seq: 0 }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Look up a live entry.
    ///
    /// An entry older than the configured timeout is evicted (from both maps)
    /// and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        if !self.config.enabled {
            return None;
        }

        let slot = self.entries.get(key)?;
        if self.is_expired(&slot.entry) {
            tracing::debug!(key, "cache entry expired");
            self.remove(key);
            return None;
        }

        Some(slot.entry.clone())
    }

    /// Store an entry, evicting the oldest entries first if the store is full.
    pub fn put(&mut self, key: impl Into<String>, entry: CacheEntry) {
        if !self.config.enabled {
            return;
        }

        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.make_room(1);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.hashes.insert(key.clone(), entry.content_hash);
        self.entries.insert(key, Slot { entry, seq });
    }

    /// Flag a stored entry as failed validation. The loader refetches a
    /// stale entry without probing it again.
    pub fn mark_stale(&mut self, key: &str) {
        if let Some(slot) = self.entries.get_mut(key) {
            slot.entry.stale = true;
        }
    }

    /// Fingerprint recorded for `key`, if any.
    pub fn hash_of(&self, key: &str) -> Option<ContentHash> {
        self.hashes.get(key).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hashes.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hash_index_len(&self) -> usize {
        self.hashes.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        let age_ms = (self.clock.now() - entry.inserted_at).num_milliseconds();
        let timeout_ms = i64::try_from(self.config.timeout.as_millis()).unwrap_or(i64::MAX);
        age_ms > timeout_ms
    }

    /// Evict oldest-by-insertion entries so that `incoming` more fit.
    fn make_room(&mut self, incoming: usize) {
        let max = self.config.max_entries;
        if self.entries.len() + incoming <= max {
            return;
        }

        let excess = self.entries.len() + incoming - max;
        let mut by_age: Vec<(DateTime<Utc>, u64, String)> = self
            .entries
            .iter()
            .map(|(key, slot)| (slot.entry.inserted_at, slot.seq, key.clone()))
            .collect();
        by_age.sort();

        for (_, _, key) in by_age.into_iter().take(excess) {
            tracing::debug!(key = %key, "evicting cache entry");
            self.remove(&key);
        }
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.hashes.remove(key);
    }
}
