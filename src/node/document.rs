//! Document type
//!
//! The root container for a parsed fragment.

use super::{Children, Element, Node};

/// Tag of the synthetic root that holds a parsed fragment.
const FRAGMENT_ROOT: &str = "body";

/// Root document container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element; for fragments a synthetic `<body>`
    pub root: Element,
}

impl Document {
    /// Wrap top-level nodes of a fragment in a synthetic root
    pub fn from_children(children: impl IntoIterator<Item = Node>) -> Self {
        let mut root = Element::new(FRAGMENT_ROOT);
        root.children.extend(children);
        Self { root }
    }

    /// Top-level children, the input to block extraction
    pub fn children(&self) -> &Children {
        &self.root.children
    }
}
