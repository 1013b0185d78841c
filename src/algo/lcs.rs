//! Longest Common Subsequence (LCS) edit scripts
//!
//! Computes a minimal Same/Add/Del script between two sequences of
//! comparable items.
//!
//! # Algorithm
//!
//! 1. Intern items of both sequences into `u32` symbols (call-local table)
//! 2. Orient the problem so the shorter sequence indexes rows
//! 3. Fill the full DP table: `dp[i][j]` = LCS length of `rows[..i]`, `cols[..j]`
//! 4. Backtrack from `(rows, cols)` to `(0, 0)`:
//!    - items match: `Same`, step diagonally
//!    - `dp[i-1][j] >= dp[i][j-1]`: `Del`, step up
//!    - otherwise: `Add`, step left
//! 5. If rows/cols were swapped, relabel every `Add` <-> `Del`
//! 6. Reverse into reading order
//!
//! The tie-break in step 4 is part of the contract: equal inputs always
//! produce the same script, and with a longer left side a shared prefix run
//! stays contiguous (`[Same, Same, Del, Del, Del]`, never interleaved).
//!
//! # Complexity
//!
//! - Time: O(n * m)
//! - Space: O(n * m) for the backtracking table
//!
//! Callers bound raw input size before tokenizing
//! (see [`DiffConfig`](crate::config::DiffConfig)).

use std::hash::Hash;

use super::intern::Interner;

// =============================================================================
// Public Types
// =============================================================================

/// One step of an edit script.
///
/// `Same` carries both payloads, so two items that compare equal but differ
/// elsewhere (e.g. blocks with equal text and different markup) keep both
/// versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp<T> {
    /// Item present on both sides: (left, right)
    Same(T, T),
    /// Item only on the right side
    Add(T),
    /// Item only on the left side
    Del(T),
}

impl<T> EditOp<T> {
    pub fn is_same(&self) -> bool {
        matches!(self, EditOp::Same(..))
    }

    pub fn is_add(&self) -> bool {
        matches!(self, EditOp::Add(_))
    }

    pub fn is_del(&self) -> bool {
        matches!(self, EditOp::Del(_))
    }

    /// Left-side payload (`Same` and `Del`)
    pub fn left(&self) -> Option<&T> {
        match self {
            EditOp::Same(l, _) | EditOp::Del(l) => Some(l),
            EditOp::Add(_) => None,
        }
    }

    /// Right-side payload (`Same` and `Add`)
    pub fn right(&self) -> Option<&T> {
        match self {
            EditOp::Same(_, r) | EditOp::Add(r) => Some(r),
            EditOp::Del(_) => None,
        }
    }

    /// Short label used by renderers and debug output.
    pub fn label(&self) -> &'static str {
        match self {
            EditOp::Same(..) => "same",
            EditOp::Add(_) => "add",
            EditOp::Del(_) => "del",
        }
    }

    /// Map both payloads through `f`.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> EditOp<U> {
        match self {
            EditOp::Same(l, r) => {
                let l = f(l);
                EditOp::Same(l, f(r))
            }
            EditOp::Add(r) => EditOp::Add(f(r)),
            EditOp::Del(l) => EditOp::Del(f(l)),
        }
    }

    /// Borrowing view of this op.
    pub fn as_ref(&self) -> EditOp<&T> {
        match self {
            EditOp::Same(l, r) => EditOp::Same(l, r),
            EditOp::Add(r) => EditOp::Add(r),
            EditOp::Del(l) => EditOp::Del(l),
        }
    }
}

/// Counts of each op kind in a script
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditStats {
    pub same: usize,
    pub added: usize,
    pub deleted: usize,
}

impl EditStats {
    pub fn from_ops<T>(ops: &[EditOp<T>]) -> Self {
        ops.iter().fold(Self::default(), |mut stats, op| {
            match op {
                EditOp::Same(..) => stats.same += 1,
                EditOp::Add(_) => stats.added += 1,
                EditOp::Del(_) => stats.deleted += 1,
            }
            stats
        })
    }

    /// Number of non-`Same` ops
    pub fn edit_count(&self) -> usize {
        self.added + self.deleted
    }

    /// Check if there are no changes
    pub fn is_unchanged(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Diff two sequences, comparing items by value.
pub fn diff<T>(old: &[T], new: &[T]) -> Vec<EditOp<T>>
where
    T: Eq + Hash + Clone,
{
    diff_by_key::<T, T, _>(old, new, |item| item)
}

/// Diff two sequences, comparing items by a borrowed key.
///
/// Emitted ops carry the full items, not the keys.
pub fn diff_by_key<T, K, F>(old: &[T], new: &[T], key: F) -> Vec<EditOp<T>>
where
    T: Clone,
    K: Eq + Hash + ?Sized,
    F: Fn(&T) -> &K,
{
    edit_steps(old, new, key)
        .into_iter()
        .map(|step| match step {
            Step::Same(i, j) => EditOp::Same(old[i].clone(), new[j].clone()),
            Step::Add(j) => EditOp::Add(new[j].clone()),
            Step::Del(i) => EditOp::Del(old[i].clone()),
        })
        .collect()
}

/// Diff two sequences, emitting references into the inputs instead of clones.
pub fn diff_refs<'a, T, K, F>(old: &'a [T], new: &'a [T], key: F) -> Vec<EditOp<&'a T>>
where
    K: Eq + Hash + ?Sized,
    F: Fn(&T) -> &K,
{
    edit_steps(old, new, key)
        .into_iter()
        .map(|step| match step {
            Step::Same(i, j) => EditOp::Same(&old[i], &new[j]),
            Step::Add(j) => EditOp::Add(&new[j]),
            Step::Del(i) => EditOp::Del(&old[i]),
        })
        .collect()
}

/// Length of the longest common subsequence.
///
/// Rolling two-row pass, O(min(n, m)) space.
pub fn lcs_length<T: Eq>(old: &[T], new: &[T]) -> usize {
    let (rows, cols) = if old.len() > new.len() { (new, old) } else { (old, new) };
    rolling_lcs_len(rows, cols)
}

// =============================================================================
// Engine
// =============================================================================

/// Index-based op, resolved to payloads by the public wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Same(usize, usize),
    Add(usize),
    Del(usize),
}

fn edit_steps<T, K, F>(old: &[T], new: &[T], key: F) -> Vec<Step>
where
    K: Eq + Hash + ?Sized,
    F: Fn(&T) -> &K,
{
    // Quick paths
    if old.is_empty() {
        return (0..new.len()).map(Step::Add).collect();
    }
    if new.is_empty() {
        return (0..old.len()).map(Step::Del).collect();
    }

    let mut interner: Interner<'_, K> = Interner::with_capacity(old.len() + new.len());
    let old_syms = interner.intern_all(old, &key);
    let new_syms = interner.intern_all(new, &key);
    tracing::trace!(
        old = old.len(),
        new = new.len(),
        symbols = interner.len(),
        "lcs: interned sequences"
    );
    drop(interner);

    // The shorter sequence indexes rows.
    let swapped = old_syms.len() > new_syms.len();
    let (rows, cols) = if swapped {
        (&new_syms[..], &old_syms[..])
    } else {
        (&old_syms[..], &new_syms[..])
    };
    if swapped {
        tracing::trace!(rows = rows.len(), cols = cols.len(), "lcs: swapped row/column roles");
    }

    let steps = backtrack(rows, cols);

    if swapped {
        steps
            .into_iter()
            .map(|step| match step {
                Step::Same(r, c) => Step::Same(c, r),
                Step::Add(c) => Step::Del(c),
                Step::Del(r) => Step::Add(r),
            })
            .collect()
    } else {
        steps
    }
}

/// Backtrack the DP table into a reading-order script, in row/column terms:
/// `Del` indexes `rows`, `Add` indexes `cols`, `Same` is `(row, col)`.
fn backtrack(rows: &[u32], cols: &[u32]) -> Vec<Step> {
    let n = rows.len();
    let m = cols.len();

    // Strip the common suffix: backtracking takes matches first, so these
    // pairs are exactly the first steps it would emit. A common prefix is
    // not stripped since ties may route the path off its diagonal.
    let mut suffix_len = 0;
    while suffix_len < n && suffix_len < m && rows[n - 1 - suffix_len] == cols[m - 1 - suffix_len] {
        suffix_len += 1;
    }
    let rows_mid = &rows[..n - suffix_len];
    let cols_mid = &cols[..m - suffix_len];

    let lcs_len = rolling_lcs_len(rows_mid, cols_mid);
    let mut steps = Vec::with_capacity(n + m - lcs_len - suffix_len);

    for k in 0..suffix_len {
        steps.push(Step::Same(n - 1 - k, m - 1 - k));
    }

    let table = LcsTable::build(rows_mid, cols_mid);
    debug_assert_eq!(table.get(rows_mid.len(), cols_mid.len()) as usize, lcs_len);

    let mut i = rows_mid.len();
    let mut j = cols_mid.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && rows_mid[i - 1] == cols_mid[j - 1] {
            steps.push(Step::Same(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || table.get(i - 1, j) >= table.get(i, j - 1)) {
            steps.push(Step::Del(i - 1));
            i -= 1;
        } else {
            steps.push(Step::Add(j - 1));
            j -= 1;
        }
    }

    steps.reverse();
    steps
}

/// LCS length with two rolling rows sized by `cols`.
fn rolling_lcs_len<T: Eq>(rows: &[T], cols: &[T]) -> usize {
    if rows.is_empty() || cols.is_empty() {
        return 0;
    }

    let mut prev = vec![0u32; cols.len() + 1];
    let mut curr = vec![0u32; cols.len() + 1];

    for r in rows {
        for (j, c) in cols.iter().enumerate() {
            curr[j + 1] = if r == c {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[cols.len()] as usize
}

/// Full (rows+1) x (cols+1) DP table, flat for cache locality.
struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(rows: &[u32], cols: &[u32]) -> Self {
        let width = cols.len() + 1;
        let mut cells = vec![0u32; (rows.len() + 1) * width];

        for i in 1..=rows.len() {
            let (above, here) = cells.split_at_mut(i * width);
            let above = &above[(i - 1) * width..];
            let here = &mut here[..width];
            for j in 1..=cols.len() {
                here[j] = if rows[i - 1] == cols[j - 1] {
                    above[j - 1] + 1
                } else {
                    above[j].max(here[j - 1])
                };
            }
        }

        Self { width, cells }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }
}

// =============================================================================
// Tests
// =============================================================================
