use std::os::raw::{c_char, c_int};

use serde_json::json;

use sb_core::{Result, SbError};
use sb_diff::{
    render_html, unified_diff, unified_diff_with_context, BatchConfig, BatchRenderer,
    DiffRenderer, DiffRequest,
};

use crate::marshal::{cstring_to_str, deserialize_json, to_json};
use crate::result::SbResult;

/// Wrap a JSON payload or an error in a freshly allocated envelope.
fn respond(call: &str, outcome: Result<String>) -> *mut SbResult {
    match outcome {
        Ok(json) => SbResult::success(&json),
        Err(e) => {
            log::warn!("{} rejected: {}", call, e);
            SbResult::failure(&e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Memory management
// ---------------------------------------------------------------------------

/// Free a `SbResult` that was returned by any `sbdiff_*` function.
///
/// Passing a null pointer is a no-op.
///
/// # Safety
///
/// `ptr` must be either null or a valid pointer that was previously returned
/// by one of the `sbdiff_*` functions and has not yet been freed.
#[no_mangle]
pub unsafe extern "C" fn sbdiff_free(ptr: *mut SbResult) {
    SbResult::free(ptr);
}

// ---------------------------------------------------------------------------
// Single diffs
// ---------------------------------------------------------------------------

/// Render the segment diff between two texts.
///
/// `prev`: null-terminated UTF-8 string, previous version of the field.
/// `new`: null-terminated UTF-8 string, new version of the field.
///
/// Returns a `SbResult` whose `data` field is a `TextDiffResult` JSON object
/// (`{"segments": [...], "stats": {...}}`) on success.
///
/// The returned pointer must be freed with `sbdiff_free`.
///
/// # Safety
///
/// Both pointer arguments must be valid, non-null, null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn sbdiff_render(prev: *const c_char, new: *const c_char) -> *mut SbResult {
    respond("sbdiff_render", render_json(prev, new))
}

unsafe fn render_json(prev: *const c_char, new: *const c_char) -> Result<String> {
    let prev = cstring_to_str(prev)?;
    let new = cstring_to_str(new)?;
    to_json(&DiffRenderer::new().diff(&prev, &new))
}

/// Render the diff between two texts as HTML spans.
///
/// Returns a `SbResult` whose `data` field is `{"html": "..."}` on success.
///
/// The returned pointer must be freed with `sbdiff_free`.
///
/// # Safety
///
/// Both pointer arguments must be valid, non-null, null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn sbdiff_render_html(
    prev: *const c_char,
    new: *const c_char,
) -> *mut SbResult {
    respond("sbdiff_render_html", html_json(prev, new))
}

unsafe fn html_json(prev: *const c_char, new: *const c_char) -> Result<String> {
    let prev = cstring_to_str(prev)?;
    let new = cstring_to_str(new)?;
    to_json(&json!({ "html": render_html(&prev, &new) }))
}

/// Render a plain-text, line-level diff.
///
/// `context` is the number of unchanged lines around each hunk. A negative
/// value lists every line without hunk headers.
///
/// Returns a `SbResult` whose `data` field is `{"diff": "..."}` on success.
///
/// The returned pointer must be freed with `sbdiff_free`.
///
/// # Safety
///
/// Both pointer arguments must be valid, non-null, null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn sbdiff_unified(
    prev: *const c_char,
    new: *const c_char,
    context: c_int,
) -> *mut SbResult {
    respond("sbdiff_unified", unified_json(prev, new, context))
}

unsafe fn unified_json(prev: *const c_char, new: *const c_char, context: c_int) -> Result<String> {
    let prev = cstring_to_str(prev)?;
    let new = cstring_to_str(new)?;
    let diff = match usize::try_from(context) {
        Ok(context) => unified_diff_with_context(&prev, &new, context),
        Err(_) => unified_diff(&prev, &new),
    };
    to_json(&json!({ "diff": diff }))
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Render many diffs in parallel.
///
/// `requests_json`: null-terminated UTF-8 string, a JSON array of
/// `{"field": ..., "prev": ..., "new": ...}` objects.
/// `options_json`: null-terminated UTF-8 string, a JSON object with batch
/// options (may be `"{}"` for defaults).
///
/// Returns a `SbResult` whose `data` field is a JSON array of
/// `{"field": ..., "result": {...}}` objects in request order.
///
/// The returned pointer must be freed with `sbdiff_free`.
///
/// # Safety
///
/// Both pointer arguments must be valid, non-null, null-terminated C strings.
#[no_mangle]
pub unsafe extern "C" fn sbdiff_render_batch(
    requests_json: *const c_char,
    options_json: *const c_char,
) -> *mut SbResult {
    respond("sbdiff_render_batch", batch_json(requests_json, options_json))
}

unsafe fn batch_json(requests_json: *const c_char, options_json: *const c_char) -> Result<String> {
    let requests_str = cstring_to_str(requests_json)?;
    let options_str = cstring_to_str(options_json)?;

    let requests: Vec<DiffRequest> = deserialize_json(&requests_str)
        .map_err(|e| SbError::InvalidInput(format!("failed to parse requests JSON: {}", e)))?;
    let config: BatchConfig = deserialize_json(&options_str)
        .map_err(|e| SbError::InvalidInput(format!("failed to parse options JSON: {}", e)))?;

    let responses = BatchRenderer::new(config).render_all(&requests);
    to_json(&responses)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    use sb_core::Segment;
    use sb_diff::{DiffResponse, TextDiffResult};

    fn to_cstr(s: &str) -> CString {
        CString::new(s).expect("CString::new")
    }

    /// Take the envelope apart, free it, and return `(ok, data, error)`.
    unsafe fn unwrap_envelope(ptr: *mut SbResult) -> (bool, Option<String>, Option<String>) {
        assert!(!ptr.is_null());
        let read = |p: *mut c_char| {
            (!p.is_null()).then(|| CStr::from_ptr(p).to_string_lossy().into_owned())
        };
        let out = ((*ptr).ok, read((*ptr).data), read((*ptr).error));
        sbdiff_free(ptr);
        out
    }

    #[test]
    fn free_null_is_noop() {
        unsafe { sbdiff_free(std::ptr::null_mut()) };
    }

    #[test]
    fn render_returns_segments() {
        let prev = to_cstr("foo\nbar\nbaz\nquuxer\n");
        let new = to_cstr("foo\nbaz\nquuxer\nrab");
        let envelope = unsafe { sbdiff_render(prev.as_ptr(), new.as_ptr()) };
        let (ok, data, error) = unsafe { unwrap_envelope(envelope) };
        assert!(ok);
        assert!(error.is_none());
        let result: TextDiffResult = serde_json::from_str(&data.unwrap()).expect("result JSON");
        assert_eq!(
            result.segments,
            vec![
                Segment::same("foo\n"),
                Segment::removed("bar\n"),
                Segment::same("baz\nquuxer\n"),
                Segment::added("rab\n"),
            ]
        );
        assert_eq!(result.stats.removed_segments, 1);
    }

    #[test]
    fn render_rejects_null() {
        let new = to_cstr("text");
        let envelope = unsafe { sbdiff_render(std::ptr::null(), new.as_ptr()) };
        let (ok, data, error) = unsafe { unwrap_envelope(envelope) };
        assert!(!ok);
        assert!(data.is_none());
        assert_eq!(error.as_deref(), Some("received null pointer"));
    }

    #[test]
    fn render_rejects_invalid_utf8() {
        let prev = CString::new(vec![0xc3, 0x28]).unwrap();
        let new = to_cstr("text");
        let envelope = unsafe { sbdiff_render(prev.as_ptr(), new.as_ptr()) };
        let (ok, _, error) = unsafe { unwrap_envelope(envelope) };
        assert!(!ok);
        assert!(error.unwrap().starts_with("invalid UTF-8"));
    }

    #[test]
    fn html_payload() {
        let prev = to_cstr("");
        let new = to_cstr("a < b");
        let envelope = unsafe { sbdiff_render_html(prev.as_ptr(), new.as_ptr()) };
        let (ok, data, _) = unsafe { unwrap_envelope(envelope) };
        assert!(ok);
        let value: serde_json::Value = serde_json::from_str(&data.unwrap()).unwrap();
        assert_eq!(value["html"], "<span class=\"added\">a &lt; b\n</span>");
    }

    #[test]
    fn unified_full_and_context() {
        let prev = to_cstr("foo\nbar\n");
        let new = to_cstr("foo\nbaz\n");

        let envelope = unsafe { sbdiff_unified(prev.as_ptr(), new.as_ptr(), -1) };
        let (ok, data, _) = unsafe { unwrap_envelope(envelope) };
        assert!(ok);
        let value: serde_json::Value = serde_json::from_str(&data.unwrap()).unwrap();
        assert_eq!(value["diff"], " foo\n-bar\n+baz\n");

        let envelope = unsafe { sbdiff_unified(prev.as_ptr(), new.as_ptr(), 0) };
        let (ok, data, _) = unsafe { unwrap_envelope(envelope) };
        assert!(ok);
        let value: serde_json::Value = serde_json::from_str(&data.unwrap()).unwrap();
        assert_eq!(value["diff"], "@@ -2 +2 @@\n-bar\n+baz\n");
    }

    #[test]
    fn batch_in_request_order() {
        let requests = to_cstr(
            r#"[{"field": "lyrics", "prev": "quuxer word", "new": "quuxer another word"},
                {"field": "notice", "prev": "", "new": "gig on friday"}]"#,
        );
        let options = to_cstr(r#"{"worker_threads": 2}"#);
        let envelope = unsafe { sbdiff_render_batch(requests.as_ptr(), options.as_ptr()) };
        let (ok, data, _) = unsafe { unwrap_envelope(envelope) };
        assert!(ok);
        let responses: Vec<DiffResponse> = serde_json::from_str(&data.unwrap()).unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].field.as_deref(), Some("lyrics"));
        assert_eq!(responses[0].result.stats.refined_ranges, 1);
        assert_eq!(
            responses[1].result.segments,
            vec![Segment::added("gig on friday\n")]
        );
    }

    #[test]
    fn batch_rejects_bad_json() {
        let requests = to_cstr("not json {{{");
        let options = to_cstr("{}");
        let envelope = unsafe { sbdiff_render_batch(requests.as_ptr(), options.as_ptr()) };
        let (ok, _, error) = unsafe { unwrap_envelope(envelope) };
        assert!(!ok);
        assert!(error
            .unwrap()
            .starts_with("invalid input: failed to parse requests JSON"));
    }
}
