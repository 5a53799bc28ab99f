use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SegmentKind
// ---------------------------------------------------------------------------

/// How a span of text relates the previous and the new version of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Present, unchanged, in both versions.
    Same,
    /// Present only in the previous version.
    Removed,
    /// Present only in the new version.
    Added,
}

impl SegmentKind {
    /// Name used for CSS classes and plain-text output.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Same => "same",
            SegmentKind::Removed => "removed",
            SegmentKind::Added => "added",
        }
    }

    /// `true` if text of this kind belongs to the previous version.
    pub fn in_prev(self) -> bool {
        matches!(self, SegmentKind::Same | SegmentKind::Removed)
    }

    /// `true` if text of this kind belongs to the new version.
    pub fn in_new(self) -> bool {
        matches!(self, SegmentKind::Same | SegmentKind::Added)
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One tagged span of literal text in a rendered diff.
///
/// Segments produced by the renderer are never empty and appear in document
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn same(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Same, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Removed, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Added, text)
    }
}

/// Rebuild the previous version from `removed` and `same` segments.
pub fn reconstruct_prev(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind.in_prev())
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the new version from `added` and `same` segments.
pub fn reconstruct_new(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind.in_new())
        .map(|s| s.text.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
