//! Markdown to HTML conversion.
//!
//! CommonMark plus tables, strikethrough, footnotes, task lists and heading
//! attributes (`# Setup {#setup}`), the last giving in-page anchors an id.

use mdroute_core::{Error, Renderer};
use pulldown_cmark::{Options, Parser, html};

/// pulldown-cmark backed [`Renderer`].
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_HEADING_ATTRIBUTES,
        }
    }
}

impl MarkdownRenderer {
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, Error> {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}
