//! Headless router instance shared by every tool call.

use std::sync::Arc;

use mdroute_client::{FetchConfig, HtmlSanitizer, HttpTransport, MarkdownRenderer};
use mdroute_core::loader::Collaborators;
use mdroute_core::{AppConfig, Clock, Error, InMemoryLocation, InMemoryPage, Location, Router, SystemClock, Transport};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What the headless page currently shows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageView {
    /// Current location fragment.
    pub fragment: String,
    /// Document title.
    pub title: String,
    /// The visible content region, if any.
    pub visible_region: Option<String>,
    /// Sanitized HTML of the visible region.
    pub html: Option<String>,
}

pub struct AppState {
    pub router: Router,
    pub page: Arc<InMemoryPage>,
    pub location: Arc<InMemoryLocation>,
}

impl AppState {
    /// Build a router that fetches over HTTP from `config.base_url`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let transport = HttpTransport::new(FetchConfig::from_app_config(config)?, Arc::clone(&clock))?;
        Ok(Self::with_transport(config, Arc::new(transport), clock))
    }

    pub fn with_transport(config: &AppConfig, transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        let page = Arc::new(InMemoryPage::new(config.regions.clone()));
        let location = Arc::new(InMemoryLocation::new(config.base_url.clone(), ""));

        let parts = Collaborators {
            transport,
            renderer: Arc::new(MarkdownRenderer::default()),
            sanitizer: Arc::new(HtmlSanitizer),
            page: page.clone(),
            location: location.clone(),
            clock,
        };

        Self { router: Router::new(config, parts), page, location }
    }

    pub fn view(&self) -> PageView {
        let visible_region = self.page.visible_regions().into_iter().next();
        let html = visible_region
            .as_deref()
            .and_then(|id| self.page.region(id))
            .map(|region| region.html);

        PageView { fragment: self.location.fragment(), title: self.page.title(), visible_region, html }
    }
}
