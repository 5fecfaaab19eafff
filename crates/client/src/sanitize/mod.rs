//! HTML sanitization for rendered documents.
//!
//! The rendered fragment is parsed with scraper and re-serialized, keeping
//! only what is safe to inject:
//! - script-capable elements are dropped together with their contents
//! - event handler (`on*`), `style` and `srcdoc` attributes are dropped
//! - URL attributes with `javascript:`, `vbscript:` or `data:` schemes are dropped

use mdroute_core::{Error, Sanitizer};
use scraper::{ElementRef, Html, Node};

const DROPPED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "frame", "frameset", "object", "embed", "applet", "link", "meta", "base", "noscript",
    "template",
];

const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "source", "track", "wbr"];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "poster", "xlink:href", "cite"];

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// scraper-backed [`Sanitizer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSanitizer;

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, html: &str) -> Result<String, Error> {
        let fragment = Html::parse_fragment(html);
        let mut out = String::with_capacity(html.len());
        write_children(fragment.root_element(), &mut out);
        Ok(out)
    }
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_escaped(out, text, false),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if DROPPED_ELEMENTS.contains(&name) {
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        if !is_allowed_attribute(attr, value) {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        push_escaped(out, value, true);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_allowed_attribute(name: &str, value: &str) -> bool {
    let name = name.to_ascii_lowercase();
    if name.starts_with("on") || name == "style" || name == "srcdoc" {
        return false;
    }
    if URL_ATTRIBUTES.contains(&name.as_str()) {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
            .collect::<String>()
            .to_ascii_lowercase();
        return !BLOCKED_SCHEMES.iter().any(|scheme| compact.starts_with(scheme));
    }
    true
}

fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
