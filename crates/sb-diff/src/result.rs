//! Diff result types: the structured output handed to templates and FFI
//! callers.
//!
//! These types are serialized to JSON; field names are part of the contract
//! with the web front end.

use serde::{Deserialize, Serialize};

use sb_core::{Segment, SegmentKind};

// ---------------------------------------------------------------------------
// DiffStats
// ---------------------------------------------------------------------------

/// Aggregate counts summarising one rendered diff.
///
/// Character counts are in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Number of `same` segments.
    pub same_segments: usize,
    /// Number of `removed` segments.
    pub removed_segments: usize,
    /// Number of `added` segments.
    pub added_segments: usize,
    /// Characters present in both versions.
    pub same_chars: usize,
    /// Characters present only in the previous version.
    pub removed_chars: usize,
    /// Characters present only in the new version.
    pub added_chars: usize,
    /// Line-level replacements that were refined word by word.
    pub refined_ranges: usize,
}

impl DiffStats {
    /// Tally `segments`; `refined_ranges` is supplied by the renderer.
    pub fn from_segments(segments: &[Segment], refined_ranges: usize) -> Self {
        let mut stats = Self {
            refined_ranges,
            ..Self::default()
        };
        for segment in segments {
            let chars = segment.text.chars().count();
            match segment.kind {
                SegmentKind::Same => {
                    stats.same_segments += 1;
                    stats.same_chars += chars;
                }
                SegmentKind::Removed => {
                    stats.removed_segments += 1;
                    stats.removed_chars += chars;
                }
                SegmentKind::Added => {
                    stats.added_segments += 1;
                    stats.added_chars += chars;
                }
            }
        }
        stats
    }
}

// ---------------------------------------------------------------------------
// TextDiffResult
// ---------------------------------------------------------------------------

/// Segments of one rendered diff together with their statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDiffResult {
    /// Ordered, non-empty segments in document order.
    pub segments: Vec<Segment>,
    pub stats: DiffStats,
}

impl TextDiffResult {
    pub fn new(segments: Vec<Segment>, refined_ranges: usize) -> Self {
        let stats = DiffStats::from_segments(&segments, refined_ranges);
        Self { segments, stats }
    }

    /// `true` if anything was added or removed.
    pub fn has_changes(&self) -> bool {
        self.stats.added_segments > 0 || self.stats.removed_segments > 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> TextDiffResult {
        TextDiffResult::new(
            vec![
                Segment::same("припев\n"),
                Segment::removed("old"),
                Segment::added("new line"),
            ],
            1,
        )
    }

    #[test]
    fn stats_count_chars_not_bytes() {
        let result = make_result();
        assert_eq!(result.stats.same_segments, 1);
        assert_eq!(result.stats.same_chars, 7);
        assert_eq!(result.stats.removed_chars, 3);
        assert_eq!(result.stats.added_chars, 8);
        assert_eq!(result.stats.refined_ranges, 1);
    }

    #[test]
    fn empty_result_has_no_changes() {
        let result = TextDiffResult::new(vec![], 0);
        assert_eq!(result.stats, DiffStats::default());
        assert!(!result.has_changes());
    }

    #[test]
    fn result_round_trips_json() {
        let result = make_result();
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("\"kind\":\"removed\""));
        assert!(json.contains("\"refined_ranges\":1"));
        let restored: TextDiffResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, result);
    }
}
