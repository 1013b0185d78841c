//! Error types for docdiff.
//!
//! The diff core (tokenizer, LCS engine, block policy) is total and never
//! fails. Errors only come from the engine layer: the input size guard and
//! the markup parser collaborator.

use thiserror::Error;

/// Which input of a comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while preparing or running a comparison.
#[derive(Debug, Error)]
pub enum DiffError {
    /// Raw input exceeded the configured byte ceiling
    #[error("{side} input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge {
        /// Offending input
        side: Side,
        /// Input length in bytes
        size: usize,
        /// Configured ceiling in bytes
        limit: usize,
    },

    /// Token or block counts would need an LCS table above the configured
    /// cell ceiling
    #[error("comparison too large: {cells} table cells exceeds limit of {limit} cells")]
    TableTooLarge {
        /// `(old + 1) * (new + 1)`, saturating
        cells: usize,
        /// Configured ceiling in cells
        limit: usize,
    },

    /// The markup parser rejected its input
    #[error("failed to parse {side} markup: {message}")]
    Parse {
        /// Input that failed to parse
        side: Side,
        /// Parser-provided reason
        message: String,
    },
}

/// Result type alias for engine operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create a parse error for one side of a comparison.
    pub fn parse(side: Side, message: impl Into<String>) -> Self {
        Self::Parse {
            side,
            message: message.into(),
        }
    }

    /// Check if this error came from a size guard.
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::InputTooLarge { .. } | Self::TableTooLarge { .. })
    }
}
