use proptest::prelude::*;

use sb_core::{reconstruct_new, reconstruct_prev, Segment, SegmentKind};
use sb_diff::render;
use sb_diff::tokenize::normalize;

/// Short multi-line texts drawn from a small vocabulary so that random
/// pairs share lines and words often enough to exercise refinement.
fn text() -> impl Strategy<Value = String> {
    let word = prop::sample::select(vec![
        "foo", "bar", "baz", "quuxer", "мороз", "песня", "a", "b", " ", "  ", "\t", "\n", "\r\n",
    ]);
    prop::collection::vec(word, 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn reconstructs_both_sides(prev in text(), new in text()) {
        let segments = render(&prev, &new);
        prop_assert_eq!(reconstruct_prev(&segments), normalize(&prev).into_owned());
        prop_assert_eq!(reconstruct_new(&segments), normalize(&new).into_owned());
    }

    #[test]
    fn no_empty_segments(prev in text(), new in text()) {
        prop_assert!(render(&prev, &new).iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn identical_inputs_are_one_same_segment(x in text()) {
        let segments = render(&x, &x);
        if x.is_empty() {
            prop_assert!(segments.is_empty());
        } else {
            prop_assert_eq!(segments, vec![Segment::same(normalize(&x).into_owned())]);
        }
    }

    #[test]
    fn normalization_is_idempotent(prev in text(), new in text()) {
        let normalized = normalize(&prev).into_owned();
        prop_assert_eq!(render(&prev, &new), render(&normalized, &new));
    }

    #[test]
    fn arbitrary_unicode_never_panics(prev in "\\PC*", new in "\\PC*") {
        let segments = render(&prev, &new);
        prop_assert_eq!(reconstruct_new(&segments), normalize(&new).into_owned());
    }

    #[test]
    fn pure_insertions_only_add(prev in text(), extra in text()) {
        let prev = normalize(&prev).into_owned();
        let new = format!("{prev}{extra}");
        let segments = render(&prev, &new);
        prop_assert!(segments.iter().all(|s| s.kind != SegmentKind::Removed));
    }
}

#[test]
fn both_empty_is_empty() {
    assert!(render("", "").is_empty());
}
