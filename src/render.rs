//! HTML rendering
//!
//! Serializes markup nodes (the renderable payload of a block) and renders
//! block edit scripts as a side-by-side table.

use crate::algo::EditOp;
use crate::attr::Attrs;
use crate::block::Block;
use crate::node::{is_raw_text, is_void_element, Element, Node};

// =============================================================================
// Node Rendering
// =============================================================================

/// Render an element to HTML.
pub fn render_element(elem: &Element) -> String {
    let mut output = String::new();
    write_element(elem, &mut output);
    output
}

/// Render a sequence of sibling nodes to HTML.
pub fn render_children(children: &[Node]) -> String {
    let mut output = String::new();
    for child in children {
        write_node(child, false, &mut output);
    }
    output
}

fn write_element(elem: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&elem.tag);
    write_attrs(&elem.attrs, output);

    if is_void_element(&elem.tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');

    let raw = is_raw_text(&elem.tag);
    for child in &elem.children {
        write_node(child, raw, output);
    }

    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn write_node(node: &Node, raw: bool, output: &mut String) {
    match node {
        Node::Element(elem) => write_element(elem, output),
        // Script/style bodies are emitted as-is
        Node::Text(text) if raw => output.push_str(&text.content),
        Node::Text(text) => escape_html_into(&text.content, output),
    }
}

fn write_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs.iter() {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        escape_attr_into(value, output);
        output.push('"');
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    escape_html_into(s, &mut result);
    result
}

fn escape_html_into(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

fn escape_attr_into(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

// =============================================================================
// Block Table Rendering
// =============================================================================

/// CSS class of the table emitted by [`render_block_table`].
pub const BLOCK_TABLE_CLASS: &str = "block-diff";

/// Render a block edit script as a two-column HTML table.
///
/// `Same` fills both cells, `Del` only the left one, `Add` only the right one.
/// Each row carries the op label as its class.
pub fn render_block_table(ops: &[EditOp<Block>]) -> String {
    let mut output = String::new();
    output.push_str("<table class=\"");
    output.push_str(BLOCK_TABLE_CLASS);
    output.push_str("\"><tbody>");

    for op in ops {
        output.push_str("<tr class=\"");
        output.push_str(op.label());
        output.push_str("\">");
        write_cell(op.left(), &mut output);
        write_cell(op.right(), &mut output);
        output.push_str("</tr>");
    }

    output.push_str("</tbody></table>");
    output
}

fn write_cell(block: Option<&Block>, output: &mut String) {
    match block {
        Some(block) => {
            output.push_str("<td>");
            output.push_str(&block.markup);
            output.push_str("</td>");
        }
        None => output.push_str("<td></td>"),
    }
}

// =============================================================================
// Tests
// =============================================================================
