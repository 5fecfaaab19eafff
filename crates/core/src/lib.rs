//! Core types and routing engine for mdroute.
//!
//! This crate provides:
//! - Fragment to document path resolution
//! - In-memory document cache with validator-based reuse
//! - The content loader and navigation driver
//! - Collaborator traits (transport, renderer, sanitizer, page, location)
//! - Configuration structures and unified error types

pub mod cache;
pub mod clock;
pub mod config;
pub mod content;
pub mod display;
pub mod error;
pub mod loader;
pub mod location;
pub mod navigator;
pub mod page;
pub mod route;
pub mod router;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheEntry, CacheStore, ContentHash};
pub use clock::{Clock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use content::{Renderer, Sanitizer};
pub use error::Error;
pub use loader::{Collaborators, ContentLoader};
pub use location::{InMemoryLocation, Location};
pub use page::{InMemoryPage, Page};
pub use route::{ResolvedRoute, RouteTable};
pub use router::{CacheStats, Router};
pub use transport::{FetchedDocument, ResponseMeta, Transport};
