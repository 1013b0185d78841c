//! Comparison configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{DiffError, DiffResult, Side};

/// Default ceiling on raw input size per side (500 KiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 500 * 1024;

/// Default ceiling on LCS table cells per comparison (128 MiB of `u32`).
pub const DEFAULT_MAX_TABLE_CELLS: usize = 32 * 1024 * 1024;

// =============================================================================
// Granularity
// =============================================================================

/// Unit of comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    /// Whitespace-separated words with punctuation normalized
    #[default]
    Word,
    /// Non-blank lines
    Line,
    /// Structural document blocks extracted from parsed markup
    Block,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Word => "word",
            Granularity::Line => "line",
            Granularity::Block => "block",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown granularity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown granularity `{0}` (expected word, line or block)")]
pub struct UnknownGranularity(pub String);

impl FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" | "words" => Ok(Granularity::Word),
            "line" | "lines" => Ok(Granularity::Line),
            "block" | "blocks" => Ok(Granularity::Block),
            _ => Err(UnknownGranularity(s.to_string())),
        }
    }
}

// =============================================================================
// DiffConfig
// =============================================================================

/// Configuration for the comparison engines.
///
/// Two guards apply. Raw input size is checked before anything is
/// tokenized or parsed. The LCS table is O(n*m) in unit count, so the
/// product of both unit counts is checked before the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Maximum raw input size per side, in bytes.
    /// Default: 500 KiB
    pub max_input_bytes: usize,
    /// Maximum LCS table size, `(old + 1) * (new + 1)` cells.
    /// Default: 32 Mi cells
    pub max_table_cells: usize,
    /// Granularity used by [`TextDiffer`](crate::engine::TextDiffer) when none is given.
    /// Default: word
    pub granularity: Granularity,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            granularity: Granularity::Word,
        }
    }
}

impl DiffConfig {
    /// Create a config with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with no ceilings. Only for trusted, small inputs.
    pub fn unbounded() -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_table_cells: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Reject input larger than `max_input_bytes`.
    pub fn check_size(&self, side: Side, input: &str) -> DiffResult<()> {
        let size = input.len();
        if size > self.max_input_bytes {
            tracing::warn!(%side, size, limit = self.max_input_bytes, "input rejected by size guard");
            return Err(DiffError::InputTooLarge {
                side,
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }

    /// Reject unit counts whose LCS table exceeds `max_table_cells`.
    pub fn check_table(&self, old: usize, new: usize) -> DiffResult<()> {
        let cells = old.saturating_add(1).saturating_mul(new.saturating_add(1));
        if cells > self.max_table_cells {
            tracing::warn!(old, new, cells, limit = self.max_table_cells, "comparison rejected by table guard");
            return Err(DiffError::TableTooLarge {
                cells,
                limit: self.max_table_cells,
            });
        }
        Ok(())
    }
}
