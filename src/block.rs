//! Block extraction and block diff
//!
//! A block is one structural unit of a document: renderable markup plus a
//! plain-text comparison key. Blocks are compared by text only, so two
//! blocks with equal text and different markup are `Same`, and the op keeps
//! both versions for rendering. Blocks without text (images, rules) are
//! compared by their markup instead.
//!
//! # Extraction policy
//!
//! Every top-level child becomes one block, except list containers
//! (`ul`/`ol`), which are decomposed per item:
//!
//! ```text
//! <ul>                                   <ul><li>One</li></ul>
//!   <li>One</li>                  ->     <ul><li><p>Two</p></li></ul>
//!   <li><p>Two</p><p>Three</p></li>      <ul><li><p>Three</p></li></ul>
//!   <li>  </li>                          (empty item dropped)
//! </ul>
//! ```
//!
//! - An item with block-level children (`p`, `h1`-`h6`, `blockquote`, `pre`)
//!   yields one block per such child, each wrapped in its own single-item list
//! - Any other item yields one block, wrapped in a single-item list
//! - Items with empty text never become blocks
//!
//! Wrapping every unit in its own list lets each unit align independently
//! while rendering as a list item of the original type.

use compact_str::CompactString;

use crate::algo::{self, EditOp};
use crate::node::{is_block_level, is_list_container, is_list_item, Element, Node};
use crate::render::{escape_html, render_element};

/// Tag recorded for blocks made from bare top-level text.
pub const TEXT_BLOCK_TAG: &str = "#text";

// =============================================================================
// Block
// =============================================================================

/// One comparable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Serialized markup used for rendering
    pub markup: String,
    /// Normalized text used for comparison
    pub text: String,
    /// Tag of the outermost rendered element
    pub tag: CompactString,
}

impl Block {
    pub fn new(
        markup: impl Into<String>,
        text: impl Into<String>,
        tag: impl Into<CompactString>,
    ) -> Self {
        Self {
            markup: markup.into(),
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// Block for a whole element.
    pub fn from_element(elem: &Element) -> Self {
        Self {
            markup: render_element(elem),
            text: elem.normalized_text(),
            tag: elem.tag.clone(),
        }
    }

    /// Check if the comparison text is empty
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Comparison key: the text, or the markup when there is no text.
    pub fn key(&self) -> &str {
        if self.is_empty() { &self.markup } else { &self.text }
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Convert top-level document children into blocks.
pub fn extract_blocks(children: &[Node]) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Element(elem) if is_list_container(&elem.tag) => {
                extract_list(elem, &mut blocks);
            }
            Node::Element(elem) => blocks.push(Block::from_element(elem)),
            Node::Text(text) if text.is_whitespace() => {}
            Node::Text(text) => blocks.push(Block {
                markup: escape_html(text.trimmed()),
                text: crate::node::collapse_whitespace(&text.content),
                tag: CompactString::const_new(TEXT_BLOCK_TAG),
            }),
        }
    }

    blocks
}

fn extract_list(list: &Element, blocks: &mut Vec<Block>) {
    for item in list.children_elements().filter(|e| is_list_item(&e.tag)) {
        let text = item.normalized_text();
        if text.is_empty() {
            tracing::trace!(list = %list.tag, "skipping empty list item");
            continue;
        }

        let mut nested = item.children_elements().filter(|e| is_block_level(&e.tag)).peekable();

        if nested.peek().is_none() {
            let wrapper = Element::new(&list.tag).child(item.clone());
            blocks.push(Block {
                markup: render_element(&wrapper),
                text,
                tag: list.tag.clone(),
            });
            continue;
        }

        for unit in nested {
            let text = unit.normalized_text();
            if text.is_empty() {
                continue;
            }
            let wrapper = Element::new(&list.tag).child(Element::new("li").child(unit.clone()));
            blocks.push(Block {
                markup: render_element(&wrapper),
                text,
                tag: list.tag.clone(),
            });
        }
    }
}

// =============================================================================
// Block Diff
// =============================================================================

/// Diff two block sequences by [`Block::key`], keeping full blocks in the
/// ops.
///
/// Empty list items and blocks with neither text nor markup are dropped from
/// both sides first. Other textless blocks take part, keyed on their markup.
pub fn diff_blocks(old: &[Block], new: &[Block]) -> Vec<EditOp<Block>> {
    let old: Vec<&Block> = old.iter().filter(|b| !is_blank(b)).collect();
    let new: Vec<&Block> = new.iter().filter(|b| !is_blank(b)).collect();

    tracing::debug!(old = old.len(), new = new.len(), "diffing blocks");

    algo::diff_by_key(&old, &new, |b: &&Block| b.key())
        .into_iter()
        .map(|op| op.map(Block::clone))
        .collect()
}

fn is_blank(block: &Block) -> bool {
    block.is_empty() && (is_list_container(&block.tag) || block.markup.trim().is_empty())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::EditStats;
    use crate::node::Text;

    fn text_block(text: &str) -> Block {
        Block::new(format!("<p>{text}</p>"), text, "p")
    }

    fn item_block(text: &str) -> Block {
        Block::new(format!("<ul><li>{text}</li></ul>"), text, "ul")
    }

    fn diff_children(old: &[Node], new: &[Node]) -> Vec<EditOp<Block>> {
        diff_blocks(&extract_blocks(old), &extract_blocks(new))
    }

    fn list(tag: &str, items: &[&str]) -> Node {
        let mut list = Element::new(tag);
        for item in items {
            list.push_elem(Element::new("li").text(*item));
        }
        list.into()
    }

    fn texts(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.text.as_str()).collect()
    }

    #[test]
    fn test_top_level_children_one_block_each() {
        let children = [
            Node::from(Element::new("h1").text("Title")),
            Node::from(Text::new("\n  ")),
            Node::from(Element::new("p").attr("class", "lead").text("Body  text")),
            Node::from(Text::new(" loose <text> ")),
        ];

        let blocks = extract_blocks(&children);
        assert_eq!(texts(&blocks), vec!["Title", "Body text", "loose <text>"]);
        assert_eq!(blocks[1].markup, "<p class=\"lead\">Body  text</p>");
        assert_eq!(blocks[1].tag.as_str(), "p");
        assert_eq!(blocks[2].tag.as_str(), TEXT_BLOCK_TAG);
        assert_eq!(blocks[2].markup, "loose &lt;text&gt;");
    }

    #[test]
    fn test_list_items_wrapped_individually() {
        let blocks = extract_blocks(&[list("ol", &["One", "Two"])]);
        assert_eq!(texts(&blocks), vec!["One", "Two"]);
        assert_eq!(blocks[0].markup, "<ol><li>One</li></ol>");
        assert_eq!(blocks[1].markup, "<ol><li>Two</li></ol>");
        assert_eq!(blocks[0].tag.as_str(), "ol");
    }

    #[test]
    fn test_list_item_keeps_attributes() {
        let ul = Element::new("ul").child(Element::new("li").attr("class", "done").text("Ship"));
        let blocks = extract_blocks(&[ul.into()]);
        assert_eq!(blocks[0].markup, "<ul><li class=\"done\">Ship</li></ul>");
    }

    #[test]
    fn test_nested_block_children_split() {
        let item = Element::new("li")
            .child(Element::new("p").text("First"))
            .child(Element::new("blockquote").text("Quoted"))
            .child(Element::new("p").text("   "));
        let ul = Element::new("ul").child(item).child(Element::new("li").text("Plain"));

        let blocks = extract_blocks(&[ul.into()]);
        assert_eq!(texts(&blocks), vec!["First", "Quoted", "Plain"]);
        assert_eq!(blocks[0].markup, "<ul><li><p>First</p></li></ul>");
        assert_eq!(blocks[1].markup, "<ul><li><blockquote>Quoted</blockquote></li></ul>");
        assert_eq!(blocks[2].markup, "<ul><li>Plain</li></ul>");
    }

    #[test]
    fn test_empty_list_items_dropped() {
        let ul = Element::new("ul")
            .child(Element::new("li").text("Item 1"))
            .child(Element::new("li").text("  \n "))
            .child(Element::new("li"))
            .child(Element::new("li").text("Item 2"));

        let blocks = extract_blocks(&[ul.into()]);
        assert_eq!(texts(&blocks), vec!["Item 1", "Item 2"]);
    }

    #[test]
    fn test_diff_blocks_skips_empty_items() {
        let left = vec![
            item_block("Item 1"),
            item_block(""),
            Block::new("", "", ""),
            item_block("Item 2"),
        ];
        let right = left.clone();

        let ops = diff_blocks(&left, &right);
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(EditOp::is_same));
        assert!(ops.iter().all(|op| !op.left().is_some_and(Block::is_empty)));
    }

    #[test]
    fn test_textless_blocks_keyed_on_markup() {
        let image = |src: &str| Node::from(Element::new("img").attr("src", src));
        let left = [Node::from(Element::new("p").text("x")), image("a.png")];
        let right = [Node::from(Element::new("p").text("x")), image("b.png")];

        let blocks = extract_blocks(&left);
        assert_eq!(blocks[1].key(), "<img src=\"a.png\" />");

        let ops = diff_children(&left, &right);
        let labels: Vec<_> = ops.iter().map(EditOp::label).collect();
        assert_eq!(labels, vec!["same", "add", "del"]);
        assert_eq!(ops[1].right().map(|b| b.markup.as_str()), Some("<img src=\"b.png\" />"));

        let ops = diff_children(&left, &left);
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(EditOp::is_same));
    }

    #[test]
    fn test_empty_paragraph_kept() {
        let left = vec![text_block("a"), text_block("")];
        let right = vec![text_block("a")];

        let ops = diff_blocks(&left, &right);
        let labels: Vec<_> = ops.iter().map(EditOp::label).collect();
        assert_eq!(labels, vec!["same", "del"]);
    }

    #[test]
    fn test_diff_blocks_same_text_different_markup() {
        let left = vec![Block::new("<p>Hi</p>", "Hi", "p")];
        let right = vec![Block::new("<p><b>Hi</b></p>", "Hi", "p")];

        let ops = diff_blocks(&left, &right);
        assert_eq!(ops, vec![EditOp::Same(left[0].clone(), right[0].clone())]);
    }

    #[test]
    fn test_list_size_mismatch() {
        let left = [list("ul", &["Item 1", "Item 2", "Item 3", "Item 4", "Item 5"])];
        let right = [list("ul", &["Item 1", "Item 2"])];

        let ops = diff_children(&left, &right);
        let labels: Vec<_> = ops.iter().map(EditOp::label).collect();
        assert_eq!(labels, vec!["same", "same", "del", "del", "del"]);
    }

    #[test]
    fn test_empty_item_does_not_misalign() {
        let left = [list("ul", &["A", "", "B"])];
        let right = [list("ul", &["A", "B"])];

        let stats = EditStats::from_ops(&diff_children(&left, &right));
        assert_eq!(stats.same, 2);
        assert!(stats.is_unchanged());
    }

    #[test]
    fn test_diff_children_mixed() {
        let left = [
            Node::from(Element::new("h1").text("Guide")),
            Node::from(Element::new("p").text("Old intro")),
        ];
        let right = [
            Node::from(Element::new("h1").text("Guide")),
            Node::from(Element::new("p").text("New intro")),
            list("ul", &["Step"]),
        ];

        let ops = diff_children(&left, &right);
        let stats = EditStats::from_ops(&ops);
        assert_eq!(stats.same, 1);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.added, 2);
        assert_eq!(ops[0].left().map(|b| b.tag.as_str()), Some("h1"));
    }
}
