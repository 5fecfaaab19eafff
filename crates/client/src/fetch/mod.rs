//! HTTP transport for documents under a fixed origin.
//!
//! ### Requests
//! - HEAD for existence and validation probes, GET for retrieval
//! - Resource paths resolve against the configured base URL
//! - Optional `_cb=<unix millis>` cache-busting parameter on every request
//! - Max body bytes: 5MB (configurable)
//!
//! ### Metadata
//! - Status, `ETag` and `Last-Modified` are surfaced as [`ResponseMeta`]

pub mod url;

use std::sync::Arc;
use std::time::{Duration, Instant};

use mdroute_core::{AppConfig, Clock, Error, FetchedDocument, ResponseMeta, Transport};
use reqwest::{Client, Method, Response, header};

pub use self::url::{CACHE_BUSTER_PARAM, UrlError, parse_base, resource_url};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Origin the document root is served from.
    pub base_url: ::url::Url,

    /// User agent string (default: "mdroute/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Whether to append `_cb=<millis>` to every request (default: true)
    pub cache_busting: bool,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,
}

impl FetchConfig {
    /// Build from application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, Error> {
        let base_url = parse_base(&config.base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self {
            base_url,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            cache_busting: config.enable_cache_busting,
            max_bytes: config.max_bytes,
        })
    }
}

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    http: Client,
    config: FetchConfig,
    clock: Arc<dyn Clock>,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: FetchConfig, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config, clock })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Request URL for a resource path, cache-busted when enabled.
    pub fn url_for(&self, resource_path: &str) -> Result<::url::Url, Error> {
        let buster = self.config.cache_busting.then(|| self.clock.now().timestamp_millis());
        resource_url(&self.config.base_url, resource_path, buster).map_err(|e| Error::InvalidUrl(e.to_string()))
    }

    async fn send(&self, method: Method, resource_path: &str) -> Result<Response, Error> {
        let url = self.url_for(resource_path)?;
        let start = Instant::now();

        let response = self
            .http
            .request(method.clone(), url.as_str())
            .header(header::ACCEPT, "text/markdown, text/plain;q=0.9, */*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Transport(format!("timeout: {}", url))
                } else {
                    Error::Transport(format!("network error: {}", e))
                }
            })?;

        tracing::debug!(
            "{} {} -> {} in {}ms",
            method,
            url,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        Ok(response)
    }
}

fn meta_of(response: &Response) -> ResponseMeta {
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };

    ResponseMeta {
        status: response.status().as_u16(),
        etag: header_value(header::ETAG),
        last_modified: header_value(header::LAST_MODIFIED),
    }
}

fn ensure_within(len: usize, max_bytes: usize) -> Result<(), Error> {
    if len > max_bytes {
        return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, max_bytes)));
    }
    Ok(())
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn head(&self, resource_path: &str) -> Result<ResponseMeta, Error> {
        let response = self.send(Method::HEAD, resource_path).await?;
        Ok(meta_of(&response))
    }

    async fn get(&self, resource_path: &str) -> Result<FetchedDocument, Error> {
        let response = self.send(Method::GET, resource_path).await?;
        let meta = meta_of(&response);

        if !meta.is_success() {
            return Ok(FetchedDocument { meta, body: String::new() });
        }

        if let Some(len) = response.content_length() {
            ensure_within(len as usize, self.config.max_bytes)?;
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("failed to read response: {}", e)))?;
        ensure_within(body.len(), self.config.max_bytes)?;

        Ok(FetchedDocument { meta, body })
    }

    fn cache_busting(&self) -> bool {
        self.config.cache_busting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdroute_core::SystemClock;

    fn config(cache_busting: bool) -> FetchConfig {
        FetchConfig {
            base_url: parse_base("http://127.0.0.1:8080/").unwrap(),
            user_agent: "mdroute/0.1".to_string(),
            timeout: Duration::from_millis(20_000),
            cache_busting,
            max_bytes: 5 * 1024 * 1024,
        }
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let config = FetchConfig::from_app_config(&AppConfig::default()).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.user_agent, "mdroute/0.1");
        assert_eq!(config.timeout, Duration::from_millis(20_000));
        assert!(config.cache_busting);
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_body_size_limit() {
        assert!(ensure_within(1024, 1024).is_ok());
        let err = ensure_within(1025, 1024).unwrap_err();
        assert!(matches!(err, Error::FetchTooLarge(ref msg) if msg == "1025 bytes exceeds 1024"));
    }

    #[test]
    fn test_fetch_config_rejects_bad_base() {
        let app = AppConfig { base_url: "ftp://example.com/".into(), ..Default::default() };
        assert!(matches!(FetchConfig::from_app_config(&app), Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_url_for_without_busting() {
        let transport = HttpTransport::new(config(false), Arc::new(SystemClock)).unwrap();
        let url = transport.url_for("public/home.md").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/public/home.md");
        assert!(!transport.cache_busting());
    }

    #[tokio::test]
    async fn test_url_for_with_busting() {
        let transport = HttpTransport::new(config(true), Arc::new(SystemClock)).unwrap();
        let url = transport.url_for("public/home.md").unwrap();
        let buster = url
            .query_pairs()
            .find(|(k, _)| k == CACHE_BUSTER_PARAM)
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(buster.parse::<i64>().unwrap() > 0);
        assert!(transport.cache_busting());
    }

    #[tokio::test]
    #[ignore = "requires a document server on 127.0.0.1:8080"]
    async fn test_head_local_server() {
        let transport = HttpTransport::new(config(true), Arc::new(SystemClock)).unwrap();
        let meta = transport.head("public/home.md").await.unwrap();
        assert!(meta.is_success());
    }
}
