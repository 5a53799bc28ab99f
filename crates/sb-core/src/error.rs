use thiserror::Error;

/// Top-level error type for the sb-core crate and dependents.
///
/// The diff engine itself is total; these variants only arise at the
/// boundaries where foreign callers hand us raw pointers and JSON.
#[derive(Debug, Error)]
pub enum SbError {
    #[error("received null pointer")]
    NullPointer,

    #[error("invalid UTF-8 in C string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, SbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_errors_convert() {
        let err: SbError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SbError::Serialization(_)));
        assert!(err.to_string().starts_with("serialization error"));
    }

    #[test]
    fn invalid_input_message() {
        let err = SbError::InvalidInput("requests must be an array".to_string());
        assert_eq!(err.to_string(), "invalid input: requests must be an array");
    }
}
