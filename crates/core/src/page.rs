//! Page (DOM) boundary and a headless in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Element-level operations the router needs from the page.
pub trait Page: Send + Sync {
    /// Whether an element with `id` exists.
    fn contains(&self, id: &str) -> bool;

    /// Replace the inner HTML of `id`. Returns false when the element is absent.
    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    /// Ids of every managed content region.
    fn regions(&self) -> Vec<String>;

    fn set_visible(&self, id: &str, visible: bool);

    /// Scroll `id` into view. Returns false when no such element exists.
    fn scroll_into_view(&self, id: &str) -> bool;

    fn set_title(&self, title: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub html: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
struct PageState {
    regions: BTreeMap<String, Region>,
    title: String,
    scrolled: Vec<String>,
}

/// Headless page made of named regions.
///
/// In-page anchors are any `id="..."` attribute inside a region's HTML.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    state: Mutex<PageState>,
}

impl InMemoryPage {
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let regions = regions.into_iter().map(|id| (id.into(), Region::default())).collect();
        Self { state: Mutex::new(PageState { regions, ..Default::default() }) }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    pub fn region(&self, id: &str) -> Option<Region> {
        self.state().regions.get(id).cloned()
    }

    /// Ids of the regions currently visible, in id order.
    pub fn visible_regions(&self) -> Vec<String> {
        self.state()
            .regions
            .iter()
            .filter(|(_, region)| region.visible)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Every element id scrolled into view so far.
    pub fn scrolled(&self) -> Vec<String> {
        self.state().scrolled.clone()
    }
}

impl Page for InMemoryPage {
    fn contains(&self, id: &str) -> bool {
        self.state().regions.contains_key(id)
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        match self.state().regions.get_mut(id) {
            Some(region) => {
                region.html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn regions(&self) -> Vec<String> {
        self.state().regions.keys().cloned().collect()
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(region) = self.state().regions.get_mut(id) {
            region.visible = visible;
        }
    }

    fn scroll_into_view(&self, id: &str) -> bool {
        let mut state = self.state();
        let needle = format!("id=\"{id}\"");
        let found = state.regions.contains_key(id) || state.regions.values().any(|r| r.html.contains(&needle));
        if found {
            state.scrolled.push(id.to_string());
        }
        found
    }

    fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
    }
}
