//! HTML tag builders for asset references.

use serde::{Deserialize, Serialize};

use crate::asset::{AttrMap, AttrValue};
use crate::utils::html;

/// Attributes owned by the tag builders. Values for these come from the
/// bundling pipeline, never from the item's attribute map.
const MANAGED_ATTRS: [&str; 3] = ["href", "src", "rel"];

/// Build a stylesheet `<link>` tag.
pub fn link_tag(href: &str, attrs: &AttrMap) -> String {
    let mut tag = String::with_capacity(64);
    tag.push_str("<link rel=\"stylesheet\"");
    push_attr(&mut tag, "href", href);
    push_extra_attrs(&mut tag, attrs);
    tag.push('>');
    tag
}

/// Build a `<script>` tag.
pub fn script_tag(src: &str, attrs: &AttrMap) -> String {
    let mut tag = String::with_capacity(64);
    tag.push_str("<script");
    push_attr(&mut tag, "src", src);
    push_extra_attrs(&mut tag, attrs);
    tag.push_str("></script>");
    tag
}

fn push_attr(tag: &mut String, name: &str, value: &str) {
    tag.push(' ');
    tag.push_str(name);
    tag.push_str("=\"");
    tag.push_str(&html::escape_attr(value));
    tag.push('"');
}

/// Emit custom attributes in map (key) order.
///
/// `Bool(true)` renders bare, `Bool(false)` is omitted, everything else
/// renders as a quoted, escaped value.
fn push_extra_attrs(tag: &mut String, attrs: &AttrMap) {
    for (key, value) in attrs.iter() {
        if MANAGED_ATTRS.contains(&key) {
            continue;
        }
        match value {
            AttrValue::Bool(true) => {
                tag.push(' ');
                tag.push_str(key);
            }
            AttrValue::Bool(false) => {}
            AttrValue::Int(n) => push_attr(tag, key, &n.to_string()),
            AttrValue::Str(s) => push_attr(tag, key, s),
        }
    }
}

// ============================================================================
// Indentation
// ============================================================================

/// Indentation prefix for emitted tags.
///
/// Configured either as a tab count (`indent = 2`) or a literal string
/// (`indent = "    "`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indent {
    Tabs(usize),
    Literal(String),
}

impl Default for Indent {
    fn default() -> Self {
        Self::Tabs(0)
    }
}

impl Indent {
    /// The prefix string put before every emitted tag.
    pub fn prefix(&self) -> String {
        match self {
            Self::Tabs(count) => "\t".repeat(*count),
            Self::Literal(s) => s.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_tag_plain() {
        let tag = link_tag("/static/app.css", &AttrMap::new());
        assert_eq!(tag, "<link rel=\"stylesheet\" href=\"/static/app.css\">");
    }

    #[test]
    fn test_link_tag_with_attrs_in_key_order() {
        let mut attrs = AttrMap::new();
        attrs.set("media", "print");
        attrs.set("crossorigin", "anonymous");
        let tag = link_tag("/a.css", &attrs);
        assert_eq!(
            tag,
            "<link rel=\"stylesheet\" href=\"/a.css\" crossorigin=\"anonymous\" media=\"print\">"
        );
    }

    #[test]
    fn test_script_tag_plain() {
        let tag = script_tag("/static/app.js", &AttrMap::new());
        assert_eq!(tag, "<script src=\"/static/app.js\"></script>");
    }

    #[test]
    fn test_boolean_attrs() {
        let mut attrs = AttrMap::new();
        attrs.set("defer", true);
        attrs.set("nomodule", false);
        let tag = script_tag("/a.js", &attrs);
        assert_eq!(tag, "<script src=\"/a.js\" defer></script>");
    }

    #[test]
    fn test_integer_attrs() {
        let mut attrs = AttrMap::new();
        attrs.set("tabindex", -1_i64);
        let tag = script_tag("/a.js", &attrs);
        assert_eq!(tag, "<script src=\"/a.js\" tabindex=\"-1\"></script>");
    }

    #[test]
    fn test_attr_values_are_escaped() {
        let mut attrs = AttrMap::new();
        attrs.set("data-title", "a \"quoted\" <name>");
        let tag = link_tag("/a.css", &attrs);
        assert!(tag.contains("data-title=\"a &quot;quoted&quot; &lt;name&gt;\""));
    }

    #[test]
    fn test_managed_attrs_are_ignored() {
        let mut attrs = AttrMap::new();
        attrs.set("href", "/evil.css");
        attrs.set("rel", "preload");
        let tag = link_tag("/real.css", &attrs);
        assert_eq!(tag, "<link rel=\"stylesheet\" href=\"/real.css\">");
    }

    #[test]
    fn test_href_is_escaped() {
        let tag = link_tag("/a.css?v=1&x=\"2\"", &AttrMap::new());
        assert!(tag.contains("href=\"/a.css?v=1&amp;x=&quot;2&quot;\""));
    }

    #[test]
    fn test_indent_prefix() {
        assert_eq!(Indent::default().prefix(), "");
        assert_eq!(Indent::Tabs(2).prefix(), "\t\t");
        assert_eq!(Indent::Literal("  ".to_string()).prefix(), "  ");
    }
}
