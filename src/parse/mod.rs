//! Markup parser capability.
//!
//! Block-granularity diffs need a parser that turns a markup fragment into
//! top-level [`Node`]s. The parser is a collaborator chosen by the host at
//! construction time, in one of two flavors:
//!
//! - [`FragmentParser`]: synchronous, used by [`DocumentDiffer`](crate::engine::DocumentDiffer)
//! - [`AsyncFragmentParser`]: asynchronous, used by
//!   [`AsyncDocumentDiffer`](crate::engine::AsyncDocumentDiffer) (requires `async` feature)
//!
//! [`HtmlParser`] is the built-in synchronous implementation.

mod html;

pub use html::{HtmlParser, DEFAULT_MAX_DEPTH};

use thiserror::Error;

use crate::node::Node;

/// Parser failure with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Synchronous fragment parser.
pub trait FragmentParser: Send + Sync {
    /// Parse a markup fragment into its top-level nodes.
    fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError>;
}

impl<P: FragmentParser + ?Sized> FragmentParser for &P {
    fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError> {
        (**self).parse_fragment(markup)
    }
}

impl<P: FragmentParser + ?Sized> FragmentParser for Box<P> {
    fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError> {
        (**self).parse_fragment(markup)
    }
}

// =============================================================================
// Async capability (async feature)
// =============================================================================

#[cfg(feature = "async")]
mod async_impl {
    use std::future::Future;

    use super::{FragmentParser, ParseError};
    use crate::node::Node;

    /// Asynchronous fragment parser.
    ///
    /// # Example
    ///
    /// ```ignore
    /// struct RemoteParser {
    ///     client: HttpClient,
    /// }
    ///
    /// impl AsyncFragmentParser for RemoteParser {
    ///     async fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError> {
    ///         let tree = self.client.post("/parse", markup).await?;
    ///         Ok(tree.into_nodes())
    ///     }
    /// }
    /// ```
    pub trait AsyncFragmentParser: Send + Sync {
        /// Parse a markup fragment into its top-level nodes.
        fn parse_fragment(
            &self,
            markup: &str,
        ) -> impl Future<Output = Result<Vec<Node>, ParseError>> + Send;
    }

    /// Exposes a synchronous parser through the async capability.
    ///
    /// The returned future is already complete; parsing happens on first poll.
    #[derive(Debug, Clone, Default)]
    pub struct ReadyParser<P>(pub P);

    impl<P: FragmentParser> AsyncFragmentParser for ReadyParser<P> {
        fn parse_fragment(
            &self,
            markup: &str,
        ) -> impl Future<Output = Result<Vec<Node>, ParseError>> + Send {
            let result = self.0.parse_fragment(markup);
            std::future::ready(result)
        }
    }
}

#[cfg(feature = "async")]
pub use async_impl::{AsyncFragmentParser, ReadyParser};
