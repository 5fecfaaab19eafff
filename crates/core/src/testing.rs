//! Fakes for the collaborator traits, shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::Error;
use crate::cache::{CacheConfig, CacheStore};
use crate::clock::ManualClock;
use crate::content::{Renderer, Sanitizer};
use crate::loader::{Collaborators, ContentLoader, LoaderSettings};
use crate::location::InMemoryLocation;
use crate::page::InMemoryPage;
use crate::route::RouteTable;
use crate::transport::{FetchedDocument, ResponseMeta, Transport};

pub(crate) fn doc(body: &str, etag: Option<&str>, last_modified: Option<&str>) -> FetchedDocument {
    FetchedDocument {
        meta: ResponseMeta {
            status: 200,
            etag: etag.map(String::from),
            last_modified: last_modified.map(String::from),
        },
        body: body.to_string(),
    }
}

#[derive(Default)]
struct TransportState {
    docs: HashMap<String, FetchedDocument>,
    get_status: HashMap<String, u16>,
    heads: Vec<String>,
    gets: Vec<String>,
    fail_heads_from: Option<usize>,
}

/// Serves documents from a map and records every request.
#[derive(Default)]
pub(crate) struct FakeTransport {
    state: Mutex<TransportState>,
}

impl FakeTransport {
    pub(crate) fn insert(&self, path: &str, doc: FetchedDocument) {
        self.state.lock().unwrap().docs.insert(path.to_string(), doc);
    }

    /// HEAD requests numbered `nth` (1-based) and later fail at the transport level.
    pub(crate) fn fail_heads_from(&self, nth: usize) {
        self.state.lock().unwrap().fail_heads_from = Some(nth);
    }

    pub(crate) fn fail_get_with(&self, path: &str, status: u16) {
        self.state.lock().unwrap().get_status.insert(path.to_string(), status);
    }

    pub(crate) fn restore_get(&self, path: &str) {
        self.state.lock().unwrap().get_status.remove(path);
    }

    pub(crate) fn heads(&self, path: &str) -> usize {
        self.state.lock().unwrap().heads.iter().filter(|p| *p == path).count()
    }

    pub(crate) fn gets(&self, path: &str) -> usize {
        self.state.lock().unwrap().gets.iter().filter(|p| *p == path).count()
    }

    pub(crate) fn total_heads(&self) -> usize {
        self.state.lock().unwrap().heads.len()
    }

    pub(crate) fn total_gets(&self) -> usize {
        self.state.lock().unwrap().gets.len()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn head(&self, resource_path: &str) -> Result<ResponseMeta, Error> {
        let mut state = self.state.lock().unwrap();
        state.heads.push(resource_path.to_string());
        if state.fail_heads_from.is_some_and(|nth| state.heads.len() >= nth) {
            return Err(Error::Transport("connection reset".into()));
        }
        Ok(match state.docs.get(resource_path) {
            Some(doc) => doc.meta.clone(),
            None => ResponseMeta { status: 404, ..Default::default() },
        })
    }

    async fn get(&self, resource_path: &str) -> Result<FetchedDocument, Error> {
        let mut state = self.state.lock().unwrap();
        state.gets.push(resource_path.to_string());
        if let Some(status) = state.get_status.get(resource_path) {
            let meta = ResponseMeta { status: *status, ..Default::default() };
            return Ok(FetchedDocument { meta, body: String::new() });
        }
        Ok(match state.docs.get(resource_path) {
            Some(doc) => doc.clone(),
            None => FetchedDocument { meta: ResponseMeta { status: 404, ..Default::default() }, body: String::new() },
        })
    }
}

/// Confirms every HEAD and parks each GET until the test releases it.
/// GET number `n` (1-based) answers with the body `# Write n`.
#[derive(Default)]
pub(crate) struct GatedTransport {
    gates: Mutex<Vec<Option<oneshot::Sender<()>>>>,
}

impl GatedTransport {
    pub(crate) fn issued(&self) -> usize {
        self.gates.lock().unwrap().len()
    }

    pub(crate) fn release(&self, nth: usize) {
        if let Some(gate) = self.gates.lock().unwrap()[nth - 1].take() {
            let _ = gate.send(());
        }
    }
}

#[async_trait::async_trait]
impl Transport for GatedTransport {
    async fn head(&self, _resource_path: &str) -> Result<ResponseMeta, Error> {
        Ok(ResponseMeta { status: 200, ..Default::default() })
    }

    async fn get(&self, _resource_path: &str) -> Result<FetchedDocument, Error> {
        let (tx, rx) = oneshot::channel();
        let nth = {
            let mut gates = self.gates.lock().unwrap();
            gates.push(Some(tx));
            gates.len()
        };
        rx.await.map_err(|_| Error::Transport("gate dropped".into()))?;
        Ok(doc(&format!("# Write {nth}"), None, None))
    }
}

/// Wraps text in a paragraph; refuses the literal body `BROKEN`.
pub(crate) struct ParagraphRenderer;

impl Renderer for ParagraphRenderer {
    fn render(&self, markdown: &str) -> Result<String, Error> {
        if markdown == "BROKEN" {
            return Err(Error::RenderFailed("unparseable".into()));
        }
        Ok(format!("<p>{markdown}</p>"))
    }
}

pub(crate) struct PassThrough;

impl Sanitizer for PassThrough {
    fn sanitize(&self, html: &str) -> Result<String, Error> {
        Ok(html.to_string())
    }
}

pub(crate) fn epoch() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-20T00:00:00Z").unwrap().with_timezone(&Utc)
}

/// A loader wired to fakes, with handles to each fake.
pub(crate) struct Harness {
    pub(crate) routes: RouteTable,
    pub(crate) transport: Arc<FakeTransport>,
    pub(crate) page: Arc<InMemoryPage>,
    pub(crate) location: Arc<InMemoryLocation>,
    pub(crate) clock: Arc<ManualClock>,
    pub(crate) loader: Arc<ContentLoader>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_cache(CacheConfig::default())
    }

    pub(crate) fn with_cache(config: CacheConfig) -> Self {
        let transport = Arc::new(FakeTransport::default());
        Self::build(config, transport.clone(), transport)
    }

    /// Harness whose loader talks to `driven` instead of the counting fake.
    pub(crate) fn with_transport(driven: Arc<dyn Transport>) -> Self {
        Self::build(CacheConfig::default(), Arc::new(FakeTransport::default()), driven)
    }

    fn build(config: CacheConfig, transport: Arc<FakeTransport>, driven: Arc<dyn Transport>) -> Self {
        let page = Arc::new(InMemoryPage::new(["home", "about", "blog", "404"]));
        let location = Arc::new(InMemoryLocation::new("http://localhost/", ""));
        let clock = Arc::new(ManualClock::new(epoch()));
        let cache = Arc::new(tokio::sync::Mutex::new(CacheStore::new(config, clock.clone())));

        let parts = Collaborators {
            transport: driven,
            renderer: Arc::new(ParagraphRenderer),
            sanitizer: Arc::new(PassThrough),
            page: page.clone(),
            location: location.clone(),
            clock: clock.clone(),
        };
        let loader = Arc::new(ContentLoader::new(cache, parts, LoaderSettings::default()));

        Self { routes: RouteTable::default(), transport, page, location, clock, loader }
    }

    pub(crate) fn with(self, path: &str, doc: FetchedDocument) -> Self {
        self.transport.insert(path, doc);
        self
    }
}
