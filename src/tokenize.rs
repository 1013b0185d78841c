//! Text tokenization for word and line diffs
//!
//! Turns raw text into normalized tokens. Pure and deterministic: the same
//! input always yields the same tokens, and empty input yields no tokens.
//!
//! # Word mode
//!
//! 1. Newlines become spaces, whitespace runs collapse, ends are trimmed
//! 2. URL-like runs are swapped for private-use placeholders
//! 3. Spacing around `, . ! ? ; :` becomes exactly one trailing space
//! 4. Placeholders are restored
//! 5. Split on whitespace
//!
//! URL-like runs are matched greedily, so trailing punctuation glued to a URL
//! stays in the token: `"example.com,"` is one token. A bare domain starts at
//! a host character, so `"Hello,example.com"` still splits after the comma.
//!
//! # Line mode
//!
//! Line endings are unified, horizontal whitespace collapses, each line is
//! trimmed and blank lines are dropped.
//!
//! Text that already contains the private-use code points U+E000 and U+E001
//! never panics, but a literal placeholder whose number matches a recorded
//! URL in the same call is replaced by that URL.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::Granularity;

/// Opens a URL placeholder.
const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closes a URL placeholder.
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:https?://|www\.)\S+",
        r"|\b[A-Za-z0-9.-]+\.(?:com|org|net|edu|gov)\b\S*",
        r"|\S+@\S+\.\S+",
    ))
    .unwrap()
});

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*([,.!?;:])\s*").unwrap());

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap());

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r").unwrap());

static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").unwrap());

// =============================================================================
// TokenMode
// =============================================================================

/// Tokenizer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenMode {
    Word,
    Line,
}

impl TokenMode {
    /// Mode for a text granularity; `None` for block granularity.
    pub fn for_granularity(granularity: Granularity) -> Option<Self> {
        match granularity {
            Granularity::Word => Some(TokenMode::Word),
            Granularity::Line => Some(TokenMode::Line),
            Granularity::Block => None,
        }
    }
}

impl From<TokenMode> for Granularity {
    fn from(mode: TokenMode) -> Self {
        match mode {
            TokenMode::Word => Granularity::Word,
            TokenMode::Line => Granularity::Line,
        }
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Tokenize `text` in the given mode.
pub fn tokenize(text: &str, mode: TokenMode) -> Vec<String> {
    match mode {
        TokenMode::Word => tokenize_words(text),
        TokenMode::Line => tokenize_lines(text),
    }
}

/// Word tokens with punctuation attached to the preceding word.
pub fn tokenize_words(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let collapsed = collapsed.trim();

    let mut placeholders = Placeholders::default();
    let protected = placeholders.protect(collapsed);

    let spaced = PUNCTUATION.replace_all(&protected, "$1 ");
    let spaced = MULTI_SPACE.replace_all(&spaced, " ");

    let restored = placeholders.restore(spaced.trim());

    restored.split_whitespace().map(str::to_string).collect()
}

/// Non-blank, trimmed lines.
pub fn tokenize_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let unified = LINE_BREAK.replace_all(text, "\n");
    let collapsed = HORIZONTAL_SPACE.replace_all(&unified, " ");
    let collapsed = BLANK_LINES.replace_all(&collapsed, "\n");

    collapsed
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Placeholders
// =============================================================================

/// URL placeholder table for one tokenizer call.
///
/// Placeholder `n` is `U+E000 n U+E001`, where `n` is the index of the
/// original run in `originals`.
#[derive(Debug, Default)]
struct Placeholders {
    originals: Vec<String>,
}

impl Placeholders {
    /// Replace every URL-like run with a fresh placeholder.
    fn protect(&mut self, text: &str) -> String {
        URL_LIKE
            .replace_all(text, |caps: &Captures<'_>| {
                let index = self.originals.len();
                self.originals.push(caps[0].to_string());
                format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
            })
            .into_owned()
    }

    /// Put every recorded run back.
    fn restore(&self, text: &str) -> String {
        if self.originals.is_empty() {
            return text.to_string();
        }
        PLACEHOLDER
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.originals.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

// =============================================================================
// Tests
// =============================================================================
