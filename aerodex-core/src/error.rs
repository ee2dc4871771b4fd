//! # Error Handling
//!
//! Error types for AeroDex operations.
//!
//! Lookup misses and caller mistakes (`NotFound`, `DuplicateKey`,
//! `InvalidCode`, `MalformedInput`) leave every index unchanged and are
//! recoverable. `IndexDesync` means the two indexes disagree and the catalog
//! should be rebuilt.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias for AeroDex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Primary error type for AeroDex
#[derive(Error, Debug)]
pub enum Error {
    // Lookup Errors
    #[error("No record with code {code}")]
    NotFound { code: String },

    #[error("A record with code {code} already exists")]
    DuplicateKey { code: String },

    // Input Errors
    #[error("Invalid code {input:?}: {reason}")]
    InvalidCode { input: String, reason: String },

    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    // Index Errors
    #[error("Index desynchronized: {details}")]
    IndexDesync { details: String },

    // System Errors
    #[error("Allocation failed: {resource}")]
    Allocation { resource: String },

    #[error("IO error: {message}")]
    Io { message: String, source: std::io::Error },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    pub fn not_found(code: impl ToString) -> Self {
        Error::NotFound { code: code.to_string() }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::DuplicateKey { .. } => true,
            Error::InvalidCode { .. } => true,
            Error::MalformedInput { .. } => true,
            Error::Allocation { .. } => true,
            Error::IndexDesync { .. } => false,
            Error::Io { .. } => false,
            Error::Configuration { .. } => true,
            Error::Internal { .. } => true,
        }
    }

    /// Get error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "NOT_FOUND",
            Error::DuplicateKey { .. } => "DUPLICATE_KEY",
            Error::InvalidCode { .. } => "INVALID_CODE",
            Error::MalformedInput { .. } => "MALFORMED_INPUT",
            Error::IndexDesync { .. } => "INDEX_DESYNC",
            Error::Allocation { .. } => "ALLOCATION_FAILED",
            Error::Io { .. } => "IO_ERROR",
            Error::Configuration { .. } => "CONFIG_ERROR",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::Allocation {
            resource: err.to_string(),
        }
    }
}

/// Extension trait for adding context to results
pub trait ResultExt<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e {
            Error::Io { message, source } => Error::Io {
                message: format!("{}: {}", f(), message),
                source,
            },
            other => Error::Internal {
                message: format!("{}: {}", f(), other),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_are_recoverable() {
        assert!(Error::not_found("LAX").is_recoverable());
        assert!(!Error::IndexDesync { details: "x".into() }.is_recoverable());
        assert!(Error::Configuration { message: "x".into() }.is_recoverable());
        assert!(Error::Internal { message: "x".into() }.is_recoverable());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::not_found("LAX").error_code(), "NOT_FOUND");
        let err = Error::MalformedInput { line: 3, message: "missing ';'".into() };
        assert_eq!(err.error_code(), "MALFORMED_INPUT");
        assert_eq!(err.to_string(), "Malformed input at line 3: missing ';'");
    }

    #[test]
    fn test_io_context_keeps_source() {
        let res: Result<()> = Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into());
        let err = res.with_context(|| "opening data.txt".to_string()).unwrap_err();
        match err {
            Error::Io { message, source } => {
                assert!(message.starts_with("opening data.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_try_reserve_maps_to_allocation() {
        let mut v: Vec<u64> = Vec::new();
        let err: Error = v.try_reserve(usize::MAX).unwrap_err().into();
        assert_eq!(err.error_code(), "ALLOCATION_FAILED");
    }
}
