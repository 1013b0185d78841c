//! Comparison engines.
//!
//! Wraps the pure core (tokenizer, LCS engine, block policy) with the input
//! size guard and the markup parser collaborator.
//!
//! - [`TextDiffer`]: word or line diffs of raw text
//! - [`DocumentDiffer`]: block diffs through a synchronous [`FragmentParser`]
//! - [`AsyncDocumentDiffer`]: block diffs through an [`AsyncFragmentParser`]
//!   (requires `async` feature)
//!
//! The host picks the parser flavor once, by constructing one differ or the
//! other. Both document differs share extraction and block diffing.
//!
//! # Example
//!
//! ```ignore
//! use docdiff::engine::{DocumentDiffer, TextDiffer};
//! use docdiff::parse::HtmlParser;
//!
//! let words = TextDiffer::default().diff("Hello world", "Hello beautiful world")?;
//! println!("{}", words.report.summary());
//!
//! let blocks = DocumentDiffer::new(HtmlParser::new()).diff(old_html, new_html)?;
//! println!("{}", blocks.to_html());
//! ```

use crate::algo::{self, EditOp};
use crate::block::{self, extract_blocks, Block};
use crate::config::{DiffConfig, Granularity};
use crate::error::{DiffError, DiffResult, Side};
use crate::node::{Document, Node};
use crate::parse::{FragmentParser, ParseError};
use crate::render::render_block_table;
use crate::report::DiffReport;
use crate::tokenize::{tokenize, TokenMode};

// =============================================================================
// Results
// =============================================================================

/// Result of a word or line diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDiff {
    pub ops: Vec<EditOp<String>>,
    pub report: DiffReport,
}

impl TextDiff {
    fn new(ops: Vec<EditOp<String>>, granularity: Granularity) -> Self {
        let report = DiffReport::from_ops(&ops, granularity);
        Self { ops, report }
    }
}

/// Result of a block diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDiff {
    pub ops: Vec<EditOp<Block>>,
    pub report: DiffReport,
}

impl BlockDiff {
    fn new(ops: Vec<EditOp<Block>>) -> Self {
        let report = DiffReport::from_ops(&ops, Granularity::Block);
        Self { ops, report }
    }

    /// Render as a side-by-side HTML table.
    pub fn to_html(&self) -> String {
        render_block_table(&self.ops)
    }
}

// =============================================================================
// TextDiffer
// =============================================================================

/// Word or line differ over raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDiffer {
    config: DiffConfig,
    mode: TokenMode,
}

impl Default for TextDiffer {
    fn default() -> Self {
        Self::new(DiffConfig::default())
    }
}

impl TextDiffer {
    /// Create a differ. Block granularity in `config` falls back to word mode.
    pub fn new(config: DiffConfig) -> Self {
        let mode = TokenMode::for_granularity(config.granularity).unwrap_or(TokenMode::Word);
        Self { config, mode }
    }

    pub fn with_mode(mut self, mode: TokenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn mode(&self) -> TokenMode {
        self.mode
    }

    /// Tokenize both inputs and diff the tokens.
    pub fn diff(&self, left: &str, right: &str) -> DiffResult<TextDiff> {
        check_sizes(&self.config, left, right)?;

        let old = tokenize(left, self.mode);
        let new = tokenize(right, self.mode);
        self.config.check_table(old.len(), new.len())?;

        let granularity = Granularity::from(self.mode);
        tracing::debug!(old = old.len(), new = new.len(), %granularity, "diffing text");

        Ok(TextDiff::new(algo::diff(&old, &new), granularity))
    }
}

// =============================================================================
// DocumentDiffer
// =============================================================================

/// Block differ over markup, parsing synchronously.
#[derive(Debug, Clone)]
pub struct DocumentDiffer<P> {
    parser: P,
    config: DiffConfig,
}

impl<P: FragmentParser> DocumentDiffer<P> {
    pub fn new(parser: P) -> Self {
        Self::with_config(parser, DiffConfig::default())
    }

    pub fn with_config(parser: P, config: DiffConfig) -> Self {
        Self { parser, config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parse one input into a document, applying the size guard.
    pub fn parse_document(&self, side: Side, markup: &str) -> DiffResult<Document> {
        self.config.check_size(side, markup)?;
        let nodes = self.parser.parse_fragment(markup).map_err(parse_error(side))?;
        Ok(Document::from_children(nodes))
    }

    /// Parse both inputs, extract blocks and diff them.
    pub fn diff(&self, left: &str, right: &str) -> DiffResult<BlockDiff> {
        check_sizes(&self.config, left, right)?;

        let old = self.parse_document(Side::Left, left)?;
        let new = self.parse_document(Side::Right, right)?;

        diff_parsed(&self.config, old.children(), new.children())
    }
}

fn check_sizes(config: &DiffConfig, left: &str, right: &str) -> DiffResult<()> {
    config.check_size(Side::Left, left)?;
    config.check_size(Side::Right, right)
}

fn parse_error(side: Side) -> impl Fn(ParseError) -> DiffError {
    move |err| DiffError::parse(side, err.to_string())
}

fn diff_parsed(config: &DiffConfig, old: &[Node], new: &[Node]) -> DiffResult<BlockDiff> {
    let old = extract_blocks(old);
    let new = extract_blocks(new);
    config.check_table(old.len(), new.len())?;

    tracing::debug!(old = old.len(), new = new.len(), "diffing documents");
    Ok(BlockDiff::new(block::diff_blocks(&old, &new)))
}

// =============================================================================
// AsyncDocumentDiffer (async feature)
// =============================================================================

#[cfg(feature = "async")]
mod async_impl {
    use futures_util::future::try_join;

    use super::{check_sizes, diff_parsed, parse_error, BlockDiff};
    use crate::config::DiffConfig;
    use crate::error::{DiffResult, Side};
    use crate::parse::AsyncFragmentParser;

    /// Block differ over markup, parsing asynchronously.
    ///
    /// Both sides are parsed concurrently.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let differ = AsyncDocumentDiffer::new(RemoteParser::new(client));
    /// let result = differ.diff(old_html, new_html).await?;
    /// ```
    #[derive(Debug, Clone)]
    pub struct AsyncDocumentDiffer<P> {
        parser: P,
        config: DiffConfig,
    }

    impl<P: AsyncFragmentParser> AsyncDocumentDiffer<P> {
        pub fn new(parser: P) -> Self {
            Self::with_config(parser, DiffConfig::default())
        }

        pub fn with_config(parser: P, config: DiffConfig) -> Self {
            Self { parser, config }
        }

        pub fn config(&self) -> &DiffConfig {
            &self.config
        }

        pub fn parser(&self) -> &P {
            &self.parser
        }

        /// Parse both inputs, extract blocks and diff them.
        pub async fn diff(&self, left: &str, right: &str) -> DiffResult<BlockDiff> {
            check_sizes(&self.config, left, right)?;

            let old = async {
                self.parser
                    .parse_fragment(left)
                    .await
                    .map_err(parse_error(Side::Left))
            };
            let new = async {
                self.parser
                    .parse_fragment(right)
                    .await
                    .map_err(parse_error(Side::Right))
            };
            let (old, new) = try_join(old, new).await?;

            diff_parsed(&self.config, &old, &new)
        }
    }
}

#[cfg(feature = "async")]
pub use async_impl::AsyncDocumentDiffer;

// =============================================================================
// Batch (parallel feature)
// =============================================================================

/// Diff many text pairs in parallel.
///
/// Each pair is diffed independently with its own interning state; results
/// are returned in input order.
#[cfg(feature = "parallel")]
pub fn diff_batch<S>(differ: &TextDiffer, pairs: &[(S, S)]) -> Vec<DiffResult<TextDiff>>
where
    S: AsRef<str> + Sync,
{
    use rayon::prelude::*;

    pairs
        .par_iter()
        .map(|(left, right)| differ.diff(left.as_ref(), right.as_ref()))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::HtmlParser;
    use static_assertions::assert_impl_all;

    assert_impl_all!(TextDiff: Send, Sync);
    assert_impl_all!(BlockDiff: Send, Sync);
    assert_impl_all!(TextDiffer: Send, Sync);
    assert_impl_all!(DocumentDiffer<HtmlParser>: Send, Sync);

    fn labels<T>(ops: &[EditOp<T>]) -> Vec<&'static str> {
        ops.iter().map(EditOp::label).collect()
    }

    #[test]
    fn test_text_word_diff() {
        let result = TextDiffer::default()
            .diff("Hello world", "Hello beautiful world")
            .unwrap();

        assert_eq!(
            result.ops,
            vec![
                EditOp::Same("Hello".to_string(), "Hello".to_string()),
                EditOp::Add("beautiful".to_string()),
                EditOp::Same("world".to_string(), "world".to_string()),
            ]
        );
        assert_eq!(
            result.report.summary(),
            "Added: 1 • Removed: 0 • Same: 2 • Granularity: word"
        );
    }

    #[test]
    fn test_text_line_diff() {
        let differ = TextDiffer::new(DiffConfig::new().with_granularity(Granularity::Line));
        assert_eq!(differ.mode(), TokenMode::Line);

        let result = differ.diff("one\ntwo\n\nthree", "one\r\nthree\nfour").unwrap();
        assert_eq!(labels(&result.ops), vec!["same", "del", "same", "add"]);
        assert_eq!(result.report.granularity, Granularity::Line);
    }

    #[test]
    fn test_text_block_granularity_falls_back_to_words() {
        let differ = TextDiffer::new(DiffConfig::new().with_granularity(Granularity::Block));
        assert_eq!(differ.mode(), TokenMode::Word);
    }

    #[test]
    fn test_text_empty_vs_identical() {
        let differ = TextDiffer::default();

        let empty = differ.diff("", "   ").unwrap();
        assert!(empty.ops.is_empty());
        assert_eq!(empty.report.status().label(), "nothing to compare");

        let same = differ.diff("a b", "a  b").unwrap();
        assert_eq!(same.report.status().label(), "no differences");
    }

    #[test]
    fn test_size_guard() {
        let differ = TextDiffer::new(DiffConfig::new().with_max_input_bytes(8));

        let err = differ.diff("short", "this is too long").unwrap_err();
        assert!(matches!(
            err,
            DiffError::InputTooLarge { side: Side::Right, size: 16, limit: 8 }
        ));

        let err = differ.diff("this is too long", "x").unwrap_err();
        assert!(matches!(err, DiffError::InputTooLarge { side: Side::Left, .. }));

        assert!(differ.diff("12345678", "").is_ok());
    }

    #[test]
    fn test_default_size_guard() {
        let big = "a".repeat(crate::config::DEFAULT_MAX_INPUT_BYTES + 1);
        let err = TextDiffer::default().diff(&big, "a").unwrap_err();
        assert!(err.is_too_large());
    }

    #[test]
    fn test_table_guard() {
        let differ = TextDiffer::new(DiffConfig::new().with_max_table_cells(100));

        let err = differ.diff(&"a ".repeat(10), &"b ".repeat(10)).unwrap_err();
        assert!(matches!(err, DiffError::TableTooLarge { cells: 121, limit: 100 }));

        assert!(differ.diff(&"a ".repeat(9), &"b ".repeat(9)).is_ok());
    }

    #[test]
    fn test_default_table_guard_below_input_guard() {
        // Both sides pass the byte guard but would need a 10^10 cell table
        let left = "a b ".repeat(100_000);
        let right = format!("b {left}");
        assert!(left.len() < crate::config::DEFAULT_MAX_INPUT_BYTES);

        let err = TextDiffer::default().diff(&left, &right).unwrap_err();
        assert!(matches!(err, DiffError::TableTooLarge { .. }));
        assert!(err.is_too_large());
    }

    #[test]
    fn test_document_table_guard_counts_blocks() {
        let config = DiffConfig::new().with_max_table_cells(8);
        let differ = DocumentDiffer::with_config(HtmlParser::new(), config);

        assert!(differ.diff("<p>a</p>", "<ul><li>b</li><li>c</li></ul>").is_ok());

        let err = differ
            .diff("<p>a</p><p>b</p>", "<ul><li>b</li><li>c</li></ul>")
            .unwrap_err();
        assert!(matches!(err, DiffError::TableTooLarge { cells: 9, limit: 8 }));
    }

    #[test]
    fn test_document_diff() {
        let left = "<h1>Plan</h1><ul><li>Item 1</li><li></li><li>Item 2</li></ul>";
        let right = "<h1 class=\"title\">Plan</h1>\n<ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>";

        let result = DocumentDiffer::new(HtmlParser::new()).diff(left, right).unwrap();
        assert_eq!(labels(&result.ops), vec!["same", "same", "same", "add"]);
        assert_eq!(
            result.report.summary(),
            "Added: 1 • Removed: 0 • Same: 3 • Granularity: block"
        );

        let html = result.to_html();
        assert!(html.contains("<td><h1>Plan</h1></td><td><h1 class=\"title\">Plan</h1></td>"));
        assert!(html.contains("<tr class=\"add\"><td></td><td><ul><li>Item 3</li></ul></td></tr>"));
    }

    #[test]
    fn test_document_list_shrink() {
        let left = "<ol><li>Item 1</li><li>Item 2</li><li>Item 3</li><li>Item 4</li><li>Item 5</li></ol>";
        let right = "<ol><li>Item 1</li><li>Item 2</li></ol>";

        let result = DocumentDiffer::new(HtmlParser::new()).diff(left, right).unwrap();
        assert_eq!(labels(&result.ops), vec!["same", "same", "del", "del", "del"]);
    }

    #[test]
    fn test_document_parse_error_names_side() {
        let differ = DocumentDiffer::new(HtmlParser::new());
        let err = differ.diff("<p>ok</p>", "<p class=\"x").unwrap_err();
        assert!(matches!(err, DiffError::Parse { side: Side::Right, .. }));
        assert!(err.to_string().starts_with("failed to parse right markup: "));
    }

    #[test]
    fn test_document_size_guard_before_parse() {
        let config = DiffConfig::new().with_max_input_bytes(4);
        let differ = DocumentDiffer::with_config(HtmlParser::new(), config);
        let err = differ.diff("<p>long</p>", "<p").unwrap_err();
        assert!(matches!(err, DiffError::InputTooLarge { side: Side::Left, .. }));
    }

    #[test]
    fn test_parse_document() {
        let differ = DocumentDiffer::new(HtmlParser::new());
        let doc = differ.parse_document(Side::Left, "<ul><li>a</li></ul><p>b</p>").unwrap();
        assert_eq!(doc.children().len(), 2);
        assert_eq!(doc.children()[0].text_content(), "a");

        let err = differ.parse_document(Side::Right, "<p").unwrap_err();
        assert!(matches!(err, DiffError::Parse { side: Side::Right, .. }));
    }

    #[test]
    fn test_document_list_item_closed_by_next_item() {
        let result = DocumentDiffer::new(HtmlParser::new())
            .diff("<ul><li><p>A<li>B</ul>", "<ul><li><p>A</p></li><li>B</li></ul>")
            .unwrap();
        assert_eq!(labels(&result.ops), vec!["same", "same"]);

        let texts: Vec<_> = result.ops.iter().filter_map(|op| op.left()).map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
    }

    #[test]
    fn test_document_image_change_detected() {
        let result = DocumentDiffer::new(HtmlParser::new())
            .diff("<p>x</p><img src=\"a.png\">", "<p>x</p><img src=\"b.png\">")
            .unwrap();
        assert_eq!(labels(&result.ops), vec!["same", "add", "del"]);
        assert_eq!(result.report.status().label(), "2 changes");
    }

    #[test]
    fn test_document_empty_inputs() {
        let result = DocumentDiffer::new(HtmlParser::new()).diff("", "\n  ").unwrap();
        assert!(result.ops.is_empty());
        assert_eq!(result.report.status().label(), "nothing to compare");
        assert_eq!(result.to_html(), "<table class=\"block-diff\"><tbody></tbody></table>");
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;
        use crate::parse::{AsyncFragmentParser, ReadyParser};

        struct SlowParser;

        impl AsyncFragmentParser for SlowParser {
            async fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError> {
                tokio::task::yield_now().await;
                HtmlParser::new().parse_fragment(markup)
            }
        }

        #[tokio::test]
        async fn test_async_matches_sync() {
            let left = "<p>Intro</p><ul><li><p>A</p><p>B</p></li></ul>";
            let right = "<p>Intro</p><ul><li><p>B</p></li></ul>";

            let sync = DocumentDiffer::new(HtmlParser::new()).diff(left, right).unwrap();
            let ready = AsyncDocumentDiffer::new(ReadyParser(HtmlParser::new()))
                .diff(left, right)
                .await
                .unwrap();
            let slow = AsyncDocumentDiffer::new(SlowParser).diff(left, right).await.unwrap();

            assert_eq!(labels(&sync.ops), vec!["same", "del", "same"]);
            assert_eq!(sync, ready);
            assert_eq!(sync, slow);
        }

        #[tokio::test]
        async fn test_async_errors() {
            let differ = AsyncDocumentDiffer::with_config(
                SlowParser,
                DiffConfig::new().with_max_input_bytes(16),
            );

            let err = differ.diff("<div", "<p>ok</p>").await.unwrap_err();
            assert!(matches!(err, DiffError::Parse { side: Side::Left, .. }));

            let err = differ.diff("<p>ok</p>", "<p>way too long</p>").await.unwrap_err();
            assert!(err.is_too_large());
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_diff_batch_preserves_order() {
        let pairs = vec![
            ("a b", "a c"),
            ("same", "same"),
            ("", ""),
        ];
        let results = diff_batch(&TextDiffer::default(), &pairs);

        let statuses: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().map(|d| d.report.status().label()).unwrap())
            .collect();
        assert_eq!(statuses, vec!["2 changes", "no differences", "nothing to compare"]);
    }
}
