//! Prelude module for common imports.
//!
//! ```ignore
//! use docdiff::prelude::*;
//! ```

// Algorithms
pub use crate::algo::{diff, diff_by_key, diff_refs, lcs_length, EditOp, EditStats};

// Tokenizer
pub use crate::tokenize::{tokenize, tokenize_lines, tokenize_words, TokenMode};

// Blocks
pub use crate::block::{diff_blocks, extract_blocks, Block};

// Node types
pub use crate::node::{Children, Document, Element, Node, Text};

// Attributes
pub use crate::attr::{Attrs, AttrsExt};

// Parser
pub use crate::parse::{FragmentParser, HtmlParser, ParseError};

#[cfg(feature = "async")]
pub use crate::parse::{AsyncFragmentParser, ReadyParser};

// Engine
pub use crate::engine::{BlockDiff, DocumentDiffer, TextDiff, TextDiffer};

#[cfg(feature = "async")]
pub use crate::engine::AsyncDocumentDiffer;

#[cfg(feature = "parallel")]
pub use crate::engine::diff_batch;

// Report & render
pub use crate::render::{render_block_table, render_element};
pub use crate::report::{DiffReport, ReportStatus};

// Config
pub use crate::config::{DiffConfig, Granularity};

// Error
pub use crate::error::{DiffError, DiffResult, Side};
