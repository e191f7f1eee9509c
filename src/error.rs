//! Error types for the whatwg-mime crate.
//!
//! `MediaType::parse` itself is total and reports failure through
//! [`Validity`](crate::Validity); this error type only surfaces on the
//! strict conversion entry points (`FromStr` / `TryFrom<&str>`).

use thiserror::Error;

/// The main error type for the whatwg-mime crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The type portion of the media type failed to parse.
    ///
    /// Carries the byte offset where the failure was detected.
    #[error("invalid MIME type at byte {0}")]
    InvalidType(usize),

    /// The subtype portion of the media type failed to parse.
    ///
    /// Carries the byte offset where the failure was detected.
    #[error("invalid MIME subtype at byte {0}")]
    InvalidSubtype(usize),
}

/// Specialized Result type for whatwg-mime operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidType(0);
        assert_eq!(err.to_string(), "invalid MIME type at byte 0");

        let err = Error::InvalidSubtype(5);
        assert_eq!(err.to_string(), "invalid MIME subtype at byte 5");
    }

    #[test]
    fn test_error_debug() {
        let err = Error::InvalidType(3);
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidType"));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert_eq!(ok_result.unwrap(), 42);

        let err_result: Result<i32> = Err(Error::InvalidSubtype(1));
        assert!(err_result.is_err());
    }
}
