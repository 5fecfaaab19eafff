//! Markdown conversion and HTML sanitization boundaries.

use crate::Error;

/// Converts raw document text into HTML.
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, Error>;
}

/// Makes rendered HTML safe to inject into the page.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> Result<String, Error>;
}
