//! docdiff - Deterministic LCS diffing of words, lines, and document blocks
//!
//! ## Core Concepts
//!
//! **One engine, three granularities**: a single LCS differ produces ordered
//! `Same`/`Add`/`Del` edit scripts over word tokens, line tokens, or blocks
//! extracted from parsed markup. Output is fully deterministic: ties during
//! backtracking always prefer `Del`.
//!
//! **Explicit parser capability**: block diffs need a markup parser. The host
//! picks a synchronous [`FragmentParser`] or an asynchronous
//! [`AsyncFragmentParser`] once, by constructing a [`DocumentDiffer`] or an
//! [`AsyncDocumentDiffer`].
//!
//! ## Modules
//! - `tokenize`: word/line tokenizer with URL protection
//! - `algo`: LCS differ (`diff`, `diff_by_key`, `EditOp`)
//! - `node`: parsed markup tree
//! - `parse`: parser capability and the built-in `HtmlParser`
//! - `block`: block extraction policy and block differ
//! - `engine`: size-guarded differs tying it together
//! - `report`/`render`: counts, summary line, HTML table
//!
//! ## Usage
//!
//! ```ignore
//! use docdiff::prelude::*;
//!
//! let result = TextDiffer::default().diff("Hello world", "Hello beautiful world")?;
//! assert_eq!(
//!     result.report.summary(),
//!     "Added: 1 • Removed: 0 • Same: 2 • Granularity: word",
//! );
//!
//! let blocks = DocumentDiffer::new(HtmlParser::new()).diff(old_html, new_html)?;
//! let table = blocks.to_html();
//! ```

mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Algorithms: LCS diff
pub mod algo;

/// Text tokenization
pub mod tokenize;

/// Block extraction and block diff
pub mod block;

// =============================================================================
// Markup
// =============================================================================

/// Node types: Document, Element, Node, Text
pub mod node;

/// Attribute types
pub mod attr;

/// Markup parser capability
pub mod parse;

/// HTML rendering
pub mod render;

// =============================================================================
// Engine
// =============================================================================

/// Size-guarded differs
pub mod engine;

/// Counts and summary
pub mod report;

/// Configuration
pub mod config;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Algorithms
pub use algo::{diff, diff_by_key, EditOp, EditStats};

// Tokenizer
pub use tokenize::{tokenize, TokenMode};

// Blocks
pub use block::{diff_blocks, extract_blocks, Block};

// Node types
pub use node::{Children, Document, Element, Node, Text};

// Parser
pub use parse::{FragmentParser, HtmlParser, ParseError};

#[cfg(feature = "async")]
pub use parse::{AsyncFragmentParser, ReadyParser};

// Engine
pub use engine::{BlockDiff, DocumentDiffer, TextDiff, TextDiffer};

#[cfg(feature = "async")]
pub use engine::AsyncDocumentDiffer;

#[cfg(feature = "parallel")]
pub use engine::diff_batch;

// Report
pub use report::{DiffReport, ReportStatus};

// Config
pub use config::{DiffConfig, Granularity};

// Error types
pub use error::{DiffError, DiffResult, Side};
