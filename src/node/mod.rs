//! Parsed markup tree.
//!
//! This module provides `Element`, `Node`, `Text`, and `Document` types.
//! A markup parser (see [`crate::parse`]) builds them; block extraction
//! reads them.

mod document;
mod element;
mod tags;
mod text;

pub use document::Document;
pub use element::Element;
pub(crate) use element::collapse_whitespace;
pub use tags::{is_block_level, is_list_container, is_list_item, is_raw_text, is_void_element};
pub use text::Text;

use smallvec::SmallVec;

use crate::macros::impl_enum_accessors;

/// Node in a markup tree - either Element or Text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    // Generates for each variant (element -> Element, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(element, text);

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(e) => e.text_content(),
            Node::Text(t) => t.content.clone(),
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;
