//! Element type - markup elements with attributes and children
//!
//! The core building block of the markup tree.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};

use super::{Children, Node, Text};

// =============================================================================
// Element
// =============================================================================

/// Markup element with attributes and child nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: CompactString,
    /// Element attributes, in source order
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self {
            tag: CompactString::from(tag.as_ref().to_ascii_lowercase()),
            attrs: Vec::new(),
            children: SmallVec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an attribute (builder style)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element (builder style)
    pub fn child(mut self, child: Element) -> Self {
        self.push_elem(child);
        self
    }

    /// Append a text child (builder style)
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.push_text(content);
        self
    }

    /// Append a child element
    pub fn push_elem(&mut self, child: Element) {
        self.children.push(Node::Element(Box::new(child)));
    }

    /// Append a text child
    pub fn push_text(&mut self, content: impl Into<String>) {
        self.children.push(Node::Text(Text::new(content)));
    }

    /// Append any node
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Set attribute value (update if exists, add if not)
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.set_attr(name, value);
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Other helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Get text content of this element (concatenated from all text nodes)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }

    /// Text content with whitespace runs collapsed to one space and trimmed.
    ///
    /// This is the comparison key of a block: markup-only differences
    /// (attributes, inline tags, indentation) do not change it.
    pub fn normalized_text(&self) -> String {
        collapse_whitespace(&self.text_content())
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("DIV");
        assert_eq!(elem.tag.as_str(), "div");
        assert!(elem.attrs.is_empty());
        assert!(elem.children.is_empty());
    }

    #[test]
    fn test_element_attrs() {
        let mut elem = Element::new("div");
        elem.set_attr("class", "container");
        elem.set_attr("id", "main");

        assert_eq!(elem.get_attr("class"), Some("container"));
        assert_eq!(elem.get_attr("id"), Some("main"));
        assert!(elem.has_attr("class"));
        assert!(!elem.has_attr("style"));
    }

    #[test]
    fn test_element_builder() {
        let elem = Element::new("p")
            .attr("class", "lead")
            .text("Hello ")
            .child(Element::new("em").text("there"));

        assert_eq!(elem.get_attr("class"), Some("lead"));
        assert_eq!(elem.children.len(), 2);
        assert_eq!(elem.children_elements().count(), 1);
        assert_eq!(elem.text_content(), "Hello there");
    }

    #[test]
    fn test_normalized_text() {
        let elem = Element::new("p")
            .text("\n   Hello\t ")
            .child(Element::new("b").text(" big  "))
            .text("world \n");
        assert_eq!(elem.normalized_text(), "Hello big world");
    }
}
