use std::ffi::CStr;
use std::os::raw::c_char;

use serde::de::DeserializeOwned;

use sb_core::{Result, SbError};

/// Serialize `value` to a JSON string.
pub fn to_json(value: &impl serde::Serialize) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Parse `json` into `T`.
pub fn deserialize_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Borrow the null-terminated C string at `ptr` and return it as an owned
/// `String`.
///
/// # Safety
///
/// `ptr` must be null or a valid pointer to a null-terminated string that
/// remains alive for the duration of this call.
pub unsafe fn cstring_to_str(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(SbError::NullPointer);
    }

    Ok(CStr::from_ptr(ptr).to_str()?.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn null_pointer_is_rejected() {
        let err = unsafe { cstring_to_str(std::ptr::null()) }.unwrap_err();
        assert!(matches!(err, SbError::NullPointer));
    }

    #[test]
    fn valid_string_is_copied() {
        let s = CString::new("Ой, мороз").unwrap();
        assert_eq!(unsafe { cstring_to_str(s.as_ptr()) }.unwrap(), "Ой, мороз");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let s = CString::new(vec![0x66, 0xff, 0x6f]).unwrap();
        let err = unsafe { cstring_to_str(s.as_ptr()) }.unwrap_err();
        assert!(matches!(err, SbError::InvalidUtf8(_)));
    }

    #[test]
    fn json_helpers() {
        let value: serde_json::Value = deserialize_json(r#"{"key": 42}"#).unwrap();
        assert_eq!(value["key"], 42);
        assert!(deserialize_json::<serde_json::Value>("not json {{{").is_err());
        assert_eq!(to_json(&vec![1, 2]).unwrap(), "[1,2]");
    }
}
