//! Longest-matching-block sequence matcher (Ratcliff/Obershelp style).
//!
//! Finds the longest contiguous run common to both sequences, then recurses
//! on the pieces to its left and right. Ties between equally long runs go to
//! the earliest position in `a`, then in `b`. No automatic junk heuristic is
//! applied, so frequent tokens such as single spaces still anchor matches.
//!
//! Opcode kinds reuse [`similar::DiffTag`].

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use similar::DiffTag;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A matching block: `a[i..i + n] == b[j..j + n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub i: usize,
    pub j: usize,
    pub n: usize,
}

/// One alignment operation: `a[i1..i2]` relates to `b[j1..j2]` as `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: DiffTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    pub fn new(tag: DiffTag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self { tag, i1, i2, j1, j2 }
    }

    pub fn old_range(&self) -> Range<usize> {
        self.i1..self.i2
    }

    pub fn new_range(&self) -> Range<usize> {
        self.j1..self.j2
    }
}

/// Sequence matcher over two borrowed slices.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Find the longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a block with `n == 0` positioned at `(alo, blo)` when nothing
    /// matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut besti = alo;
        let mut bestj = blo;
        let mut bestsize = 0;

        // j2len[j] = length of the match ending at a[i - 1], b[j].
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut newj2len: HashMap<usize, usize> = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    newj2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = newj2len;
        }

        Match {
            i: besti,
            j: bestj,
            n: bestsize,
        }
    }

    /// All maximal matching blocks in ascending order, adjacent blocks
    /// collapsed, followed by the sentinel `(len_a, len_b, 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let la = self.a.len();
        let lb = self.b.len();

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.n == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.i && blo < m.j {
                queue.push((alo, m.i, blo, m.j));
            }
            if m.i + m.n < ahi && m.j + m.n < bhi {
                queue.push((m.i + m.n, ahi, m.j + m.n, bhi));
            }
        }

        blocks.sort_by(|x, y| x.i.cmp(&y.i).then_with(|| x.j.cmp(&y.j)));

        let mut result: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for m in blocks {
            match result.last_mut() {
                Some(last) if last.i + last.n == m.i && last.j + last.n == m.j => {
                    last.n += m.n;
                }
                _ => result.push(m),
            }
        }

        result.push(Match { i: la, j: lb, n: 0 });
        result
    }

    /// Opcodes turning `a` into `b`, covering both sequences without gaps.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes = Vec::new();
        let mut i = 0;
        let mut j = 0;

        for m in self.matching_blocks() {
            let tag = match (i < m.i, j < m.j) {
                (true, true) => Some(DiffTag::Replace),
                (true, false) => Some(DiffTag::Delete),
                (false, true) => Some(DiffTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode::new(tag, i, m.i, j, m.j));
            }
            if m.n > 0 {
                opcodes.push(Opcode::new(DiffTag::Equal, m.i, m.i + m.n, m.j, m.j + m.n));
            }
            i = m.i + m.n;
            j = m.j + m.n;
        }

        opcodes
    }

    /// Opcodes grouped into hunks, each with at most `context` equal tokens
    /// of context on either side. Returns no hunks when the sequences are
    /// identical.
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            codes.push(Opcode::new(DiffTag::Equal, 0, 1, 0, 1));
        }

        if let Some(first) = codes.first_mut() {
            if first.tag == DiffTag::Equal {
                first.i1 = first.i1.max(first.i2.saturating_sub(context));
                first.j1 = first.j1.max(first.j2.saturating_sub(context));
            }
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == DiffTag::Equal {
                last.i2 = last.i2.min(last.i1.saturating_add(context));
                last.j2 = last.j2.min(last.j1.saturating_add(context));
            }
        }

        let mut groups = Vec::new();
        let mut group = Vec::new();
        for mut op in codes {
            if op.tag == DiffTag::Equal && op.i2 - op.i1 > context.saturating_mul(2) {
                group.push(Opcode::new(
                    DiffTag::Equal,
                    op.i1,
                    op.i2.min(op.i1.saturating_add(context)),
                    op.j1,
                    op.j2.min(op.j1.saturating_add(context)),
                ));
                groups.push(std::mem::take(&mut group));
                op.i1 = op.i1.max(op.i2.saturating_sub(context));
                op.j1 = op.j1.max(op.j2.saturating_sub(context));
            }
            group.push(op);
        }

        let only_equal = group.len() == 1 && group[0].tag == DiffTag::Equal;
        if !group.is_empty() && !only_equal {
            groups.push(group);
        }
        groups
    }

    /// Exact similarity `2 * M / T`, where `M` counts matched tokens.
    pub fn ratio(&self) -> f64 {
        let matches: usize = self.matching_blocks().iter().map(|m| m.n).sum();
        ratio_of(matches, self.a.len() + self.b.len())
    }

    /// Cheap upper bound on [`ratio`](Self::ratio): counts tokens shared by
    /// value, ignoring order.
    pub fn quick_ratio(&self) -> f64 {
        let mut avail: HashMap<&T, usize> = self
            .b2j
            .iter()
            .map(|(elt, indices)| (*elt, indices.len()))
            .collect();

        let mut matches = 0;
        for elt in self.a {
            if let Some(left) = avail.get_mut(elt) {
                if *left > 0 {
                    *left -= 1;
                    matches += 1;
                }
            }
        }
        ratio_of(matches, self.a.len() + self.b.len())
    }
}

fn ratio_of(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
