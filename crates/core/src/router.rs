//! Programmatic surface over the navigator and its cache.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::cache::CacheStore;
use crate::config::AppConfig;
use crate::loader::{Collaborators, ContentLoader, LoaderSettings};
use crate::navigator::{Navigator, NavigatorSettings};

/// Snapshot of cache state for page authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheStats {
    pub entry_count: usize,
    pub hash_index_count: usize,
    pub timeout_ms: u64,
    pub cache_enabled: bool,
    pub busting_enabled: bool,
}

/// A router instance: one cache, one loader, one navigator.
pub struct Router {
    navigator: Navigator,
    busting_enabled: bool,
}

impl Router {
    /// Wire a router from configuration and collaborators.
    pub fn new(config: &AppConfig, parts: Collaborators) -> Self {
        let cache = Arc::new(Mutex::new(CacheStore::new(config.cache_config(), Arc::clone(&parts.clock))));
        let settings = LoaderSettings {
            routes: config.route_table(),
            default_target: config.default_target.clone(),
            base_title: config.base_title.clone(),
        };
        let location = Arc::clone(&parts.location);
        let page = Arc::clone(&parts.page);
        let busting_enabled = parts.transport.cache_busting();

        let loader = Arc::new(ContentLoader::new(cache, parts, settings));
        let navigator = Navigator::new(
            loader,
            location,
            page,
            NavigatorSettings {
                routes: config.route_table(),
                post_load_delay: Duration::from_millis(config.post_load_delay_ms),
                anchor_delay: Duration::from_millis(config.anchor_delay_ms),
            },
        );

        Self { navigator, busting_enabled }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Initial navigation plus the on-load anchor pass.
    pub async fn start(&self) -> bool {
        let ok = self.navigator.start().await;
        self.navigator.scroll_to_anchor();
        ok
    }

    /// See [`Navigator::navigate_to`].
    pub async fn navigate_to(&self, fragment: &str) -> Option<bool> {
        self.navigator.navigate_to(fragment).await
    }

    pub async fn handle_fragment_change(&self) -> bool {
        self.navigator.handle_fragment_change().await
    }

    /// Drop every cached document and fingerprint.
    pub async fn clear_cache(&self) {
        self.navigator.loader().cache().lock().await.clear();
        tracing::info!("all caches cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        let cache = self.navigator.loader().cache().lock().await;
        CacheStats {
            entry_count: cache.len(),
            hash_index_count: cache.hash_index_len(),
            timeout_ms: u64::try_from(cache.config().timeout.as_millis()).unwrap_or(u64::MAX),
            cache_enabled: cache.config().enabled,
            busting_enabled: self.busting_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::location::{InMemoryLocation, Location};
    use crate::page::InMemoryPage;
    use crate::testing::{FakeTransport, ParagraphRenderer, PassThrough, doc, epoch};

    struct Fixture {
        router: Router,
        transport: Arc<FakeTransport>,
        location: Arc<InMemoryLocation>,
    }

    fn fixture(config: AppConfig) -> Fixture {
        let transport = Arc::new(FakeTransport::default());
        let location = Arc::new(InMemoryLocation::new("http://localhost/", ""));
        let parts = Collaborators {
            transport: transport.clone(),
            renderer: Arc::new(ParagraphRenderer),
            sanitizer: Arc::new(PassThrough),
            page: Arc::new(InMemoryPage::new(config.regions.clone())),
            location: location.clone(),
            clock: Arc::new(ManualClock::new(epoch())),
        };
        Fixture { router: Router::new(&config, parts), transport, location }
    }

    #[tokio::test]
    async fn test_stats_reflect_config() {
        let f = fixture(AppConfig { cache_timeout_ms: 60_000, ..Default::default() });
        let stats = f.router.cache_stats().await;

        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.hash_index_count, 0);
        assert_eq!(stats.timeout_ms, 60_000);
        assert!(stats.cache_enabled);
        assert!(!stats.busting_enabled);
    }

    #[tokio::test]
    async fn test_clear_cache_empties_both_maps() {
        let f = fixture(AppConfig::default());
        f.transport.insert("public/home.md", doc("# Home", None, None));
        f.transport.insert("public/about.md", doc("# About", None, None));

        assert!(f.router.start().await);
        assert_eq!(f.router.navigate_to("about").await, Some(true));
        assert_eq!(f.router.cache_stats().await.entry_count, 2);

        f.router.clear_cache().await;
        let stats = f.router.cache_stats().await;
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.hash_index_count, 0);
    }

    #[tokio::test]
    async fn test_capacity_bound_through_navigation() {
        let f = fixture(AppConfig { max_cache_size: 2, ..Default::default() });
        for id in ["one", "two", "three"] {
            f.transport.insert(&format!("public/blogs/{id}.md"), doc(id, None, None));
            f.router.navigate_to(&format!("blog/{id}")).await;
        }

        let stats = f.router.cache_stats().await;
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.hash_index_count, 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_stats() {
        let f = fixture(AppConfig { enable_memory_cache: false, ..Default::default() });
        f.transport.insert("public/home.md", doc("# Home", None, None));
        assert!(f.router.start().await);

        let stats = f.router.cache_stats().await;
        assert!(!stats.cache_enabled);
        assert_eq!(stats.entry_count, 0);
    }

    #[tokio::test]
    async fn test_handle_fragment_change_after_external_assign() {
        let f = fixture(AppConfig::default());
        f.transport.insert("public/about.md", doc("# About", None, None));

        f.location.assign_fragment("about");
        assert!(f.router.handle_fragment_change().await);
        assert_eq!(f.transport.gets("public/about.md"), 1);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            entry_count: 1,
            hash_index_count: 1,
            timeout_ms: 300_000,
            cache_enabled: true,
            busting_enabled: true,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["timeout_ms"], 300_000);
        assert_eq!(json["busting_enabled"], true);
    }
}
