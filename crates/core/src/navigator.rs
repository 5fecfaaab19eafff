//! Fragment-change driver.
//!
//! A fragment may carry an in-page anchor after a second `#` or after `:`
//! (`#blog/0001#setup`, `#blog/0001:setup`). The anchor is stripped before
//! routing and scrolled to once the document is displayed.

use std::sync::Arc;
use std::time::Duration;

use crate::loader::ContentLoader;
use crate::location::Location;
use crate::page::Page;
use crate::route::RouteTable;

#[derive(Debug, Clone)]
pub struct NavigatorSettings {
    pub routes: RouteTable,
    /// Delay between a finished load and the anchor pass (default: 100ms).
    pub post_load_delay: Duration,
    /// Delay inside the anchor pass before scrolling (default: 300ms).
    pub anchor_delay: Duration,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            post_load_delay: Duration::from_millis(100),
            anchor_delay: Duration::from_millis(300),
        }
    }
}

pub struct Navigator {
    loader: Arc<ContentLoader>,
    location: Arc<dyn Location>,
    page: Arc<dyn Page>,
    settings: NavigatorSettings,
}

impl Navigator {
    pub fn new(
        loader: Arc<ContentLoader>, location: Arc<dyn Location>, page: Arc<dyn Page>, settings: NavigatorSettings,
    ) -> Self {
        Self { loader, location, page, settings }
    }

    pub fn loader(&self) -> &Arc<ContentLoader> {
        &self.loader
    }

    /// Initial navigation. An empty fragment ends up as the home fragment.
    pub async fn start(&self) -> bool {
        let ok = self.handle_fragment_change().await;

        if self.location.fragment().is_empty() && self.location.assign_fragment(&self.settings.routes.home_fragment) {
            return self.handle_fragment_change().await;
        }
        ok
    }

    /// React to the current location fragment: resolve, load, then schedule
    /// the anchor pass for the URL seen at the start of the change.
    pub async fn handle_fragment_change(&self) -> bool {
        let href = self.location.href();
        let fragment = self.location.fragment();
        let route = self.settings.routes.resolve(page_fragment(&fragment));

        tracing::debug!(fragment = %fragment, path = %route.resource_path, "fragment changed");
        let ok = self.loader.load(&route).await;

        if let Some(anchor) = anchor_of(&href) {
            self.schedule_scroll(anchor.to_string(), self.settings.post_load_delay + self.settings.anchor_delay);
        }
        ok
    }

    /// Programmatic navigation. Returns `None` when the fragment was already
    /// current and so no change fired.
    pub async fn navigate_to(&self, fragment: &str) -> Option<bool> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if !self.location.assign_fragment(fragment) {
            return None;
        }
        Some(self.handle_fragment_change().await)
    }

    /// Anchor pass for the current URL, as run on page load.
    pub fn scroll_to_anchor(&self) {
        if let Some(anchor) = anchor_of(&self.location.href()) {
            self.schedule_scroll(anchor.to_string(), self.settings.anchor_delay);
        }
    }

    fn schedule_scroll(&self, anchor: String, delay: Duration) {
        let page = Arc::clone(&self.page);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !page.scroll_into_view(&anchor) {
                tracing::debug!(anchor = %anchor, "anchor not found on page");
            }
        });
    }
}

/// Routing part of a fragment, without any anchor component.
pub fn page_fragment(fragment: &str) -> &str {
    fragment.split(['#', ':']).next().unwrap_or_default()
}

/// In-page anchor named by a full URL, if any.
pub fn anchor_of(href: &str) -> Option<&str> {
    let mut parts = href.split('#');
    parts.next();
    let fragment = parts.next()?;
    let anchor = match parts.next() {
        Some(anchor) => anchor,
        None => fragment.split_once(':')?.1,
    };
    (!anchor.is_empty()).then_some(anchor)
}
