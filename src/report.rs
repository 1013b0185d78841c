//! Diff report: counts, summary line, status.

use std::fmt;

use crate::algo::{EditOp, EditStats};
use crate::config::Granularity;

/// Aggregate counts for one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffReport {
    pub added: usize,
    pub removed: usize,
    pub same: usize,
    pub granularity: Granularity,
}

/// Overall outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Both inputs produced no units
    NothingToCompare,
    /// Every unit matched
    NoDifferences,
    /// Number of added plus removed units
    Changed(usize),
}

impl ReportStatus {
    pub fn label(&self) -> String {
        match self {
            ReportStatus::NothingToCompare => "nothing to compare".to_string(),
            ReportStatus::NoDifferences => "no differences".to_string(),
            ReportStatus::Changed(1) => "1 change".to_string(),
            ReportStatus::Changed(n) => format!("{} changes", group_thousands(*n)),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl DiffReport {
    pub fn from_ops<T>(ops: &[EditOp<T>], granularity: Granularity) -> Self {
        Self::from_stats(EditStats::from_ops(ops), granularity)
    }

    pub fn from_stats(stats: EditStats, granularity: Granularity) -> Self {
        Self {
            added: stats.added,
            removed: stats.deleted,
            same: stats.same,
            granularity,
        }
    }

    /// Total number of ops the report was built from.
    pub fn total(&self) -> usize {
        self.added + self.removed + self.same
    }

    /// Summary line, e.g. `Added: 1,204 • Removed: 3 • Same: 17 • Granularity: word`.
    pub fn summary(&self) -> String {
        format!(
            "Added: {} • Removed: {} • Same: {} • Granularity: {}",
            group_thousands(self.added),
            group_thousands(self.removed),
            group_thousands(self.same),
            self.granularity,
        )
    }

    /// Distinguishes empty input from identical input.
    pub fn status(&self) -> ReportStatus {
        match (self.total(), self.added + self.removed) {
            (0, _) => ReportStatus::NothingToCompare,
            (_, 0) => ReportStatus::NoDifferences,
            (_, changes) => ReportStatus::Changed(changes),
        }
    }

    pub fn has_changes(&self) -> bool {
        matches!(self.status(), ReportStatus::Changed(_))
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Format a count with comma thousands separators.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
