use std::ffi::CString;
use std::os::raw::c_char;

/// C-compatible result envelope for all FFI calls.
///
/// Both `data` and `error` are heap-allocated C strings owned by this struct.
/// The caller must free the entire envelope (including the inner strings) by
/// passing the pointer to `sbdiff_free`.
#[repr(C)]
pub struct SbResult {
    /// `true` on success, `false` on failure.
    pub ok: bool,
    /// JSON payload on success; null pointer on failure.
    pub data: *mut c_char,
    /// Error message on failure; null pointer on success.
    pub error: *mut c_char,
}

impl SbResult {
    /// Allocate a successful result whose data field holds `json`.
    ///
    /// Ownership passes to the caller, who must eventually call `sbdiff_free`.
    pub fn success(json: &str) -> *mut Self {
        Box::into_raw(Box::new(SbResult {
            ok: true,
            data: to_c_string(json).into_raw(),
            error: std::ptr::null_mut(),
        }))
    }

    /// Allocate a failure result whose error field holds `message`.
    ///
    /// Ownership passes to the caller, who must eventually call `sbdiff_free`.
    pub fn failure(message: &str) -> *mut Self {
        Box::into_raw(Box::new(SbResult {
            ok: false,
            data: std::ptr::null_mut(),
            error: to_c_string(message).into_raw(),
        }))
    }

    /// Reclaim ownership of the inner C strings and the struct itself.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a pointer produced by `SbResult::success` or
    /// `SbResult::failure` that has not been freed already.
    pub unsafe fn free(ptr: *mut Self) {
        if ptr.is_null() {
            return;
        }

        let result = Box::from_raw(ptr);

        if !result.data.is_null() {
            drop(CString::from_raw(result.data));
        }

        if !result.error.is_null() {
            drop(CString::from_raw(result.error));
        }
    }
}

/// Interior NULs cannot cross the C boundary; replace them so the rest of
/// the text survives.
fn to_c_string(text: &str) -> CString {
    CString::new(text.replace('\0', "\u{FFFD}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn success_carries_data() {
        unsafe {
            let ptr = SbResult::success(r#"{"html":""}"#);
            assert!((*ptr).ok);
            assert!((*ptr).error.is_null());
            assert_eq!(CStr::from_ptr((*ptr).data).to_str().unwrap(), r#"{"html":""}"#);
            SbResult::free(ptr);
        }
    }

    #[test]
    fn failure_carries_error() {
        unsafe {
            let ptr = SbResult::failure("received null pointer");
            assert!(!(*ptr).ok);
            assert!((*ptr).data.is_null());
            assert_eq!(
                CStr::from_ptr((*ptr).error).to_str().unwrap(),
                "received null pointer"
            );
            SbResult::free(ptr);
        }
    }

    #[test]
    fn interior_nul_is_replaced() {
        unsafe {
            let ptr = SbResult::failure("bad\0byte");
            assert_eq!(
                CStr::from_ptr((*ptr).error).to_str().unwrap(),
                "bad\u{FFFD}byte"
            );
            SbResult::free(ptr);
        }
    }

    #[test]
    fn free_null_is_noop() {
        unsafe { SbResult::free(std::ptr::null_mut()) };
    }
}
