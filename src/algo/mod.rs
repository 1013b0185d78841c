//! Algorithm implementations for sequence comparison.
//!
//! - `lcs`: LCS edit scripts with deterministic tie-breaking
//! - `intern`: call-local symbol table used by `lcs`

mod intern;
mod lcs;

pub use lcs::{diff, diff_by_key, diff_refs, lcs_length, EditOp, EditStats};
