//! Built-in tolerant HTML fragment parser.
//!
//! Driven by a `quick_xml::Reader` event loop with HTML-friendly settings:
//! end tag names are not checked, stray end tags are allowed, a `&` without
//! `;` is text, and attributes may be unquoted or bare. Entity references
//! (named HTML entities and numeric references) are decoded by quick-xml.
//!
//! Malformed structure is repaired rather than rejected: stray end tags are
//! ignored, unclosed elements are closed by a matching ancestor's end tag or
//! at end of input, `<li>` closes the open `<li>` of its list, and a
//! block-level start tag closes an open `<p>`. Void elements never take
//! children. Comments, doctypes and processing instructions are skipped.
//!
//! Syntax the reader cannot tokenize (an unterminated tag, a bare `<` in
//! text or script bodies) fails with a [`ParseError`], as does nesting
//! deeper than the configured limit.

use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::node::{is_block_level, is_list_container, is_list_item, is_void_element, Element, Node, Text};

use super::{FragmentParser, ParseError};

/// Default limit on element nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Tolerant HTML fragment parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlParser {
    max_depth: usize,
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlParser {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting depth beyond which parsing fails.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl FragmentParser for HtmlParser {
    fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError> {
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;

        let mut builder = TreeBuilder::new(self.max_depth);

        loop {
            let offset = to_offset(reader.buffer_position());
            let event = reader
                .read_event()
                .map_err(|e| ParseError::new(e.to_string(), to_offset(reader.error_position())))?;

            match event {
                Event::Start(ref e) => {
                    let elem = read_element(e, offset)?;
                    builder.open(elem, offset)?;
                }
                Event::Empty(ref e) => {
                    let elem = read_element(e, offset)?;
                    builder.close_implied(&elem.tag);
                    builder.attach(elem);
                }
                Event::End(ref e) => {
                    builder.close(&decode(e.name().as_ref(), offset)?.to_ascii_lowercase());
                }
                Event::Text(ref e) => {
                    builder.append_text(&unescape_lossy(&decode(e, offset)?));
                }
                Event::CData(ref e) => {
                    builder.append_text(&decode(e, offset)?);
                }
                Event::GeneralRef(ref e) => {
                    builder.append_text(&unescape_lossy(&format!("&{};", decode(e, offset)?)));
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        Ok(builder.finish())
    }
}

fn read_element(start: &BytesStart<'_>, offset: usize) -> Result<Element, ParseError> {
    let mut elem = Element::new(decode(start.name().as_ref(), offset)?);

    let mut attrs = start.html_attributes();
    attrs.with_checks(false);
    for attr in attrs {
        let attr = attr.map_err(|e| ParseError::new(e.to_string(), offset))?;
        let name = decode(attr.key.as_ref(), offset)?.to_ascii_lowercase();
        // First occurrence wins
        if elem.has_attr(&name) {
            continue;
        }
        let value = unescape_lossy(&decode(&attr.value, offset)?).into_owned();
        elem.attrs.push((name, value));
    }

    Ok(elem)
}

/// Decode entity references, keeping the text as written when a reference
/// is unknown or unterminated.
fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

fn decode(bytes: &[u8], offset: usize) -> Result<Cow<'_, str>, ParseError> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| ParseError::new(e.to_string(), offset))
}

fn to_offset<T>(position: T) -> usize
where
    usize: TryFrom<T>,
{
    usize::try_from(position).unwrap_or(usize::MAX)
}

// =============================================================================
// TreeBuilder
// =============================================================================

/// Open-element stack plus the finished top-level nodes.
struct TreeBuilder {
    max_depth: usize,
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            roots: Vec::new(),
            open: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.roots
    }

    fn open(&mut self, elem: Element, offset: usize) -> Result<(), ParseError> {
        self.close_implied(&elem.tag);

        if is_void_element(&elem.tag) {
            self.attach(elem);
            return Ok(());
        }

        if self.open.len() >= self.max_depth {
            return Err(ParseError::new(
                format!("nesting deeper than {} elements", self.max_depth),
                offset,
            ));
        }
        self.open.push(elem);
        Ok(())
    }

    fn close(&mut self, name: &str) {
        // Stray end tags are dropped
        let Some(depth) = self.open.iter().rposition(|e| e.tag.as_str() == name) else {
            tracing::trace!(tag = %name, "ignoring unmatched end tag");
            return;
        };

        while self.open.len() > depth {
            self.close_top();
        }
    }

    /// Close elements that the incoming start tag ends implicitly.
    ///
    /// `li` closes the nearest open `li` inside the current list, with
    /// everything above it. A block-level or list start closes the nearest
    /// open `p`, stopping at list items, lists and quotes.
    fn close_implied(&mut self, incoming: &str) {
        let target = if is_list_item(incoming) {
            self.find_open(|tag| tag == "li", is_list_container)
        } else if is_block_level(incoming) || is_list_container(incoming) {
            self.find_open(|tag| tag == "p", |tag| {
                is_list_item(tag) || is_list_container(tag) || tag == "blockquote" || tag == "div"
            })
        } else {
            None
        };

        if let Some(depth) = target {
            while self.open.len() > depth {
                self.close_top();
            }
        }
    }

    /// Index of the innermost open element matching `is_target`, searching
    /// down until an element matching `is_boundary`.
    fn find_open(&self, is_target: impl Fn(&str) -> bool, is_boundary: impl Fn(&str) -> bool) -> Option<usize> {
        for (depth, elem) in self.open.iter().enumerate().rev() {
            if is_target(&elem.tag) {
                return Some(depth);
            }
            if is_boundary(&elem.tag) {
                return None;
            }
        }
        None
    }

    fn close_top(&mut self) {
        if let Some(elem) = self.open.pop() {
            self.attach(elem);
        }
    }

    fn attach(&mut self, elem: Element) {
        match self.open.last_mut() {
            Some(parent) => parent.push_elem(elem),
            None => self.roots.push(elem.into()),
        }
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children[..],
            None => &mut self.roots[..],
        };

        if let Some(Node::Text(last)) = siblings.last_mut() {
            last.content.push_str(text);
            return;
        }

        let node = Node::Text(Text::new(text));
        match self.open.last_mut() {
            Some(parent) => parent.push(node),
            None => self.roots.push(node),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
