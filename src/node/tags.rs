//! Tag-name classification
//!
//! All predicates expect lowercase tag names; the parser lowercases on input.

use crate::macros::tag_set;

tag_set!(
    /// Elements that never have children or an end tag
    is_void_element:
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
);

tag_set!(
    /// Containers decomposed item by item during block extraction
    is_list_container: "ul", "ol",
);

tag_set!(
    /// List item
    is_list_item: "li",
);

tag_set!(
    /// Block-level children that split a list item into separate blocks
    is_block_level: "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
);

tag_set!(
    /// Elements whose content is raw text, not markup
    is_raw_text: "script", "style",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_sets() {
        assert!(is_void_element("br"));
        assert!(!is_void_element("p"));
        assert!(is_list_container("ol"));
        assert!(!is_list_container("li"));
        assert!(is_list_item("li"));
        assert!(is_block_level("h3"));
        assert!(is_block_level("pre"));
        assert!(!is_block_level("span"));
        assert!(is_raw_text("style"));
    }
}
