//! Line and word tokenizers for the diff renderer.
//!
//! Both tokenizers are lossless: concatenating the tokens of a sequence
//! reproduces the input exactly. Tokens are borrowed sub-slices of the
//! input, and any contiguous run of tokens can be recovered as one slice via
//! [`TokenSeq::span`].
//!
//! Example:
//!   lines("foo\nbar\n")      → [foo\n][bar\n]
//!   words("quuxer  word\n")  → [quuxer][  ][word][\n]

use std::borrow::Cow;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// An ordered, gap-free tokenization of a source string.
///
/// `offsets` holds the byte offset of every token start plus a final entry
/// equal to `source.len()`, so token `i` is `source[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone)]
pub struct TokenSeq<'a> {
    source: &'a str,
    tokens: Vec<&'a str>,
    offsets: Vec<usize>,
}

impl<'a> TokenSeq<'a> {
    fn from_bounds(source: &'a str, offsets: Vec<usize>) -> Self {
        let tokens = offsets
            .windows(2)
            .map(|w| &source[w[0]..w[1]])
            .collect();
        Self {
            source,
            tokens,
            offsets,
        }
    }

    /// The tokens, in order.
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The concatenated text of the tokens in `range`, borrowed from the source.
    pub fn span(&self, range: Range<usize>) -> &'a str {
        if range.start >= range.end {
            return "";
        }
        &self.source[self.offsets[range.start]..self.offsets[range.end]]
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply the trailing-newline rule: a non-empty text that does not end with
/// `\n` gets one appended. Empty text stays empty.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        let mut owned = String::with_capacity(text.len() + 1);
        owned.push_str(text);
        owned.push('\n');
        Cow::Owned(owned)
    }
}

/// Split `text` into line tokens, each keeping its terminating `\n`.
///
/// A trailing fragment without a terminator becomes the last token; callers
/// that want every token terminated should [`normalize`] first.
pub fn lines(text: &str) -> TokenSeq<'_> {
    let mut offsets = vec![0];
    offsets.extend(
        text.match_indices('\n')
            .map(|(i, _)| i + 1)
            .filter(|&end| end < text.len()),
    );
    if !text.is_empty() {
        offsets.push(text.len());
    }
    TokenSeq::from_bounds(text, offsets)
}

/// Split `text` into alternating runs of whitespace and non-whitespace.
///
/// Whitespace follows Unicode's definition, so scripts other than Latin are
/// split on the same boundaries a reader would expect.
pub fn words(text: &str) -> TokenSeq<'_> {
    let mut offsets = vec![0];
    let mut prev_ws: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        if let Some(p) = prev_ws {
            if p != ws {
                offsets.push(i);
            }
        }
        prev_ws = Some(ws);
    }
    if !text.is_empty() {
        offsets.push(text.len());
    }
    TokenSeq::from_bounds(text, offsets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
