//! Call-local symbol table
//!
//! Maps every distinct item of both input sequences to a small integer so the
//! O(n*m) inner loop compares `u32`s instead of strings or blocks. A table
//! lives for exactly one diff call and is dropped with it.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Interning table scoped to a single diff invocation.
pub(crate) struct Interner<'a, K: ?Sized> {
    symbols: FxHashMap<&'a K, u32>,
}

impl<'a, K: Eq + Hash + ?Sized> Interner<'a, K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Symbol for `key`, assigned on first sight.
    #[inline]
    pub(crate) fn intern(&mut self, key: &'a K) -> u32 {
        let next = self.symbols.len() as u32;
        *self.symbols.entry(key).or_insert(next)
    }

    /// Intern every key of a sequence, in order.
    pub(crate) fn intern_all<T, F>(&mut self, items: &'a [T], key: F) -> Vec<u32>
    where
        F: Fn(&'a T) -> &'a K,
    {
        items.iter().map(|item| self.intern(key(item))).collect()
    }

    /// Number of distinct keys seen so far
    pub(crate) fn len(&self) -> usize {
        self.symbols.len()
    }
}
