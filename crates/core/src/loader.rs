//! Document loading: probe, validate, fetch or reuse, render, display.
//!
//! A load makes at most two attempts. The first targets the requested
//! document; any failure moves to the not-found document. A failure while
//! loading the not-found document ends in the built-in fallback view, so a
//! load always terminates and never reports an error to its caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex;

use crate::Error;
use crate::cache::{CacheEntry, CacheStore, probe_allows_reuse};
use crate::clock::Clock;
use crate::content::{Renderer, Sanitizer};
use crate::display::{self, title_for};
use crate::location::Location;
use crate::page::Page;
use crate::route::{ResolvedRoute, RouteTable};
use crate::transport::Transport;

/// Static view shown when even the not-found document cannot be displayed.
pub const FALLBACK_HTML: &str = r##"<div class="error-container">
  <h1>Page Not Found (404)</h1>
  <p>We apologize, but the page you're looking for could not be found.</p>
  <div class="error-help">
    <h3>Possible Causes:</h3>
    <ul>
      <li>Typo in URL</li>
      <li>Page moved or deleted</li>
      <li>Page file missing or inaccessible</li>
    </ul>
    <h3>Solutions:</h3>
    <ul>
      <li>Please verify that the URL is correct</li>
      <li><a href="#home">Return to Homepage</a></li>
      <li>Contact site administrator to check if the page exists</li>
    </ul>
  </div>
</div>"##;

/// Cache store shared between loads.
pub type SharedCache = Arc<Mutex<CacheStore>>;

/// External collaborators a loader drives.
#[derive(Clone)]
pub struct Collaborators {
    pub transport: Arc<dyn Transport>,
    pub renderer: Arc<dyn Renderer>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub page: Arc<dyn Page>,
    pub location: Arc<dyn Location>,
    pub clock: Arc<dyn Clock>,
}

/// Naming conventions the loader needs beyond the route itself.
#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub routes: RouteTable,
    /// Region receiving the fallback view when the requested one is absent.
    pub default_target: String,
    pub base_title: String,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self { routes: RouteTable::default(), default_target: "home".into(), base_title: "My Website".into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Requested,
    NotFound,
}

pub struct ContentLoader {
    cache: SharedCache,
    parts: Collaborators,
    settings: LoaderSettings,
    fragments: StdMutex<HashMap<String, String>>,
}

impl ContentLoader {
    pub fn new(cache: SharedCache, parts: Collaborators, settings: LoaderSettings) -> Self {
        Self { cache, parts, settings, fragments: StdMutex::new(HashMap::new()) }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Canonical fragment last displayed for `resource_path`.
    pub fn fragment_for(&self, resource_path: &str) -> Option<String> {
        self.fragments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resource_path)
            .cloned()
    }

    /// Load and display `route`. Returns true when a document (the requested
    /// one or the not-found one) was shown, false when the fallback view was.
    pub async fn load(&self, route: &ResolvedRoute) -> bool {
        let not_found_path = self.settings.routes.not_found_path();
        let mut current = route.clone();
        let mut attempt =
            if current.resource_path == not_found_path { Attempt::NotFound } else { Attempt::Requested };

        loop {
            let err = match self.attempt(&current).await {
                Ok(()) => return true,
                Err(err) => err,
            };

            if let Error::RenderTargetMissing(id) = &err {
                tracing::warn!(target_id = %id, path = %current.resource_path, "display target missing");
                return self.show_fallback(&self.settings.default_target);
            }

            match attempt {
                Attempt::Requested => {
                    tracing::info!(path = %current.resource_path, error = %err, "loading not-found document");
                    attempt = Attempt::NotFound;
                    current = self.settings.routes.not_found_route(&current.display_target_id);
                }
                Attempt::NotFound => {
                    tracing::warn!(path = %current.resource_path, error = %err, "not-found document unavailable");
                    return self.show_fallback(&current.display_target_id);
                }
            }
        }
    }

    async fn attempt(&self, route: &ResolvedRoute) -> Result<(), Error> {
        let path = route.resource_path.as_str();

        let exists = self
            .parts
            .transport
            .head(path)
            .await
            .map_err(|e| Error::NotFound(format!("{path}: {e}")))?;
        if !exists.is_success() {
            return Err(Error::NotFound(format!("{path}: status {}", exists.status)));
        }

        let cached = self.cache.lock().await.get(path);
        let reused = match cached {
            Some(entry) if entry.stale => {
                tracing::debug!(path, "cached entry failed validation earlier, refetching");
                None
            }
            Some(entry) => {
                let probe = self
                    .parts
                    .transport
                    .head(path)
                    .await
                    .map_err(|e| Error::ProbeFailed(format!("{path}: {e}")));
                if probe_allows_reuse(&entry, &probe) {
                    tracing::debug!(path, hash = %entry.content_hash, "using cached content");
                    Some(entry)
                } else {
                    tracing::debug!(path, "cache validation failed, fetching fresh content");
                    self.cache.lock().await.mark_stale(path);
                    None
                }
            }
            None => None,
        };

        let content = match reused {
            Some(entry) => entry.content,
            None => self.fetch(path).await?,
        };

        let html = self.parts.renderer.render(&content)?;
        let html = self.parts.sanitizer.sanitize(&html)?;
        if !self.parts.page.set_inner_html(&route.display_target_id, &html) {
            return Err(Error::RenderTargetMissing(route.display_target_id.clone()));
        }

        self.finalize(route);
        Ok(())
    }

    async fn fetch(&self, path: &str) -> Result<Arc<str>, Error> {
        let doc = self.parts.transport.get(path).await?;
        if !doc.meta.is_success() {
            return Err(Error::HttpStatus { status: doc.meta.status, path: path.to_string() });
        }

        let entry = CacheEntry::new(doc.body, doc.meta.etag, doc.meta.last_modified, self.parts.clock.now());
        let content = Arc::clone(&entry.content);
        tracing::debug!(path, hash = %entry.content_hash, bytes = content.len(), "fetched content");

        self.cache.lock().await.put(path, entry);
        Ok(content)
    }

    fn finalize(&self, route: &ResolvedRoute) {
        let fragment = route.canonical_fragment.as_str();
        self.fragments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(route.resource_path.clone(), fragment.to_string());

        if !fragment.is_empty() && self.parts.location.fragment() != fragment {
            self.parts.location.replace_fragment(fragment);
        }

        display::show(self.parts.page.as_ref(), &route.display_target_id);
        self.update_title(fragment);
    }

    /// Render the static not-found view into `target_id` (or the default
    /// region) and show it. Always returns false.
    fn show_fallback(&self, target_id: &str) -> bool {
        let page = self.parts.page.as_ref();
        let shown = if page.set_inner_html(target_id, FALLBACK_HTML) {
            target_id
        } else if page.set_inner_html(&self.settings.default_target, FALLBACK_HTML) {
            self.settings.default_target.as_str()
        } else {
            target_id
        };

        display::show(page, shown);
        let not_found = self.settings.routes.not_found_fragment.as_str();
        self.parts.location.replace_fragment(not_found);
        self.update_title(not_found);
        false
    }

    fn update_title(&self, fragment: &str) {
        let title = title_for(&self.settings.base_title, fragment, &self.settings.routes.not_found_fragment);
        self.parts.page.set_title(&title);
    }
}
