//! Client-side collaborators for mdroute.
//!
//! This crate provides the HTTP transport, Markdown renderer and HTML
//! sanitizer that the core router drives through its traits.

pub mod fetch;
pub mod render;
pub mod sanitize;

pub use fetch::{FetchConfig, HttpTransport, UrlError};
pub use render::MarkdownRenderer;
pub use sanitize::HtmlSanitizer;
