//! Plain-text, line-level diff output.
//!
//! No word refinement here: every line of a `replace` range is printed as
//! removed, then every new line as added. Inputs are normalized the same way
//! as in [`crate::render`], so each printed line ends with `\n`.

use similar::DiffTag;

use crate::matcher::{Opcode, SequenceMatcher};
use crate::tokenize::{lines, normalize, TokenSeq};

/// Every line of `prev` and `new`, prefixed `' '`, `'-'` or `'+'`.
pub fn unified_diff(prev: &str, new: &str) -> String {
    let prev = normalize(prev);
    let new = normalize(new);
    let old_lines = lines(&prev);
    let new_lines = lines(&new);

    let mut out = String::new();
    for op in SequenceMatcher::new(old_lines.tokens(), new_lines.tokens()).opcodes() {
        write_op(&mut out, &op, &old_lines, &new_lines);
    }
    out
}

/// Changed hunks only, each under an `@@ -a,b +c,d @@` header and surrounded
/// by at most `context` unchanged lines. Empty when nothing changed.
pub fn unified_diff_with_context(prev: &str, new: &str, context: usize) -> String {
    let prev = normalize(prev);
    let new = normalize(new);
    let old_lines = lines(&prev);
    let new_lines = lines(&new);

    let mut out = String::new();
    let matcher = SequenceMatcher::new(old_lines.tokens(), new_lines.tokens());
    for group in matcher.grouped_opcodes(context) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(first.i1, last.i2),
            format_range(first.j1, last.j2)
        ));
        for op in &group {
            write_op(&mut out, op, &old_lines, &new_lines);
        }
    }
    out
}

fn write_op(out: &mut String, op: &Opcode, old: &TokenSeq<'_>, new: &TokenSeq<'_>) {
    match op.tag {
        DiffTag::Equal => write_lines(out, ' ', &new.tokens()[op.new_range()]),
        DiffTag::Delete => write_lines(out, '-', &old.tokens()[op.old_range()]),
        DiffTag::Insert => write_lines(out, '+', &new.tokens()[op.new_range()]),
        DiffTag::Replace => {
            write_lines(out, '-', &old.tokens()[op.old_range()]);
            write_lines(out, '+', &new.tokens()[op.new_range()]);
        }
    }
}

fn write_lines(out: &mut String, prefix: char, lines: &[&str]) {
    for line in lines {
        out.push(prefix);
        out.push_str(line);
    }
}

/// Hunk range in unified format: 1-based start, count omitted when it is 1,
/// and an empty range reported as the line before it.
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, length),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
