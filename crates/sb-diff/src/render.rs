//! Hierarchical text diff: lines first, words inside close replacements.
//!
//! The line pass aligns the two texts line by line. Every `replace` range
//! from that pass is re-tokenized into whitespace/non-whitespace runs and,
//! when the two sides are similar enough, aligned again at word level so the
//! reader sees which words changed instead of two whole blocks of lines.
//!
//! Refinement happens at most once: a word-level frame never spawns another.

use similar::DiffTag;

use sb_core::{Segment, SegmentKind};

use crate::matcher::{Opcode, SequenceMatcher};
use crate::result::TextDiffResult;
use crate::tokenize::{lines, normalize, words, TokenSeq};

/// A line-level replacement is refined word by word only when the quick
/// ratio of its word tokens is strictly greater than this.
pub const REFINE_THRESHOLD: f64 = 0.7;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the diff between `prev` and `new` as tagged segments.
///
/// Shorthand for [`DiffRenderer::render`].
pub fn render(prev: &str, new: &str) -> Vec<Segment> {
    DiffRenderer::new().render(prev, new)
}

/// Stateless line/word diff renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffRenderer;

impl DiffRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `prev` → `new` as an ordered list of non-empty segments.
    ///
    /// Both inputs are normalized to end with `\n` unless empty.
    /// Concatenating the `same` and `removed` segments gives back the
    /// normalized `prev`; `same` and `added` give back the normalized `new`.
    pub fn render(&self, prev: &str, new: &str) -> Vec<Segment> {
        self.run(prev, new).0
    }

    /// Like [`render`](Self::render), but also reports statistics.
    pub fn diff(&self, prev: &str, new: &str) -> TextDiffResult {
        let (segments, refined) = self.run(prev, new);
        TextDiffResult::new(segments, refined)
    }

    fn run(&self, prev: &str, new: &str) -> (Vec<Segment>, usize) {
        let prev = normalize(prev);
        let new = normalize(new);

        let old_lines = lines(&prev);
        let new_lines = lines(&new);
        let line_ops = SequenceMatcher::new(old_lines.tokens(), new_lines.tokens()).opcodes();

        let mut out = SegmentSink::default();
        let mut refined = 0;
        let mut stack = vec![Frame {
            ops: line_ops.into_iter(),
            old: old_lines,
            new: new_lines,
            scope: Scope::Line,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(op) = frame.ops.next() else {
                stack.pop();
                continue;
            };

            let old_text = frame.old.span(op.old_range());
            let new_text = frame.new.span(op.new_range());

            match op.tag {
                DiffTag::Equal => out.push(SegmentKind::Same, new_text),
                DiffTag::Delete => out.push(SegmentKind::Removed, old_text),
                DiffTag::Insert => out.push(SegmentKind::Added, new_text),
                DiffTag::Replace => {
                    if frame.scope == Scope::Line {
                        if let Some(nested) = refine(old_text, new_text) {
                            refined += 1;
                            stack.push(nested);
                            continue;
                        }
                    }
                    out.push(SegmentKind::Removed, old_text);
                    out.push(SegmentKind::Added, new_text);
                }
            }
        }

        (out.segments, refined)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Line,
    Word,
}

/// Pending opcodes over one pair of token sequences.
struct Frame<'a> {
    ops: std::vec::IntoIter<Opcode>,
    old: TokenSeq<'a>,
    new: TokenSeq<'a>,
    scope: Scope,
}

/// Word-level frame for a line-level replacement, or `None` when the two
/// sides are too different for a word diff to help.
fn refine<'a>(old_text: &'a str, new_text: &'a str) -> Option<Frame<'a>> {
    let old_words = words(old_text);
    let new_words = words(new_text);
    let matcher = SequenceMatcher::new(old_words.tokens(), new_words.tokens());

    let ratio = matcher.quick_ratio();
    if ratio <= REFINE_THRESHOLD {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "flat replace: quick ratio {:.3} (exact {:.3}) over {}+{} word tokens",
                ratio,
                matcher.ratio(),
                old_words.len(),
                new_words.len()
            );
        }
        return None;
    }

    log::trace!("word-level refinement: quick ratio {:.3}", ratio);
    let ops = matcher.opcodes();
    Some(Frame {
        ops: ops.into_iter(),
        old: old_words,
        new: new_words,
        scope: Scope::Word,
    })
}

/// Collects segments, dropping empty spans.
#[derive(Default)]
struct SegmentSink {
    segments: Vec<Segment>,
}

impl SegmentSink {
    fn push(&mut self, kind: SegmentKind, text: &str) {
        if !text.is_empty() {
            self.segments.push(Segment::new(kind, text));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
