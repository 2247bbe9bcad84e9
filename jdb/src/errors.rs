use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for JDB operations.
///
/// Each error kind describes a specific category of failure, enabling precise
/// error handling at call sites.
///
/// # Examples
///
/// ```rust,ignore
/// use jdb::errors::{JdbError, ErrorKind, JdbResult};
///
/// fn example() -> JdbResult<()> {
///     Err(JdbError::new("Engine is not connected", ErrorKind::NotConnected))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Lifecycle errors
    /// A collection operation was attempted while the engine is disconnected
    NotConnected,

    // ID and identity errors
    /// An explicit `_id` collides with a document already in the collection
    DuplicateId,
    /// The provided `_id` is invalid (empty or not a string)
    InvalidId,

    // Filter errors
    /// Error during filter evaluation or construction
    FilterError,

    // IO and storage errors
    /// Generic IO error
    IOError,
    /// The file was not found
    FileNotFound,
    /// Permission denied for a file operation
    PermissionDenied,
    /// A collection file holds content that cannot be decoded
    FileCorrupted,
    /// Error encoding or decoding data
    EncodingError,

    // Validation errors
    /// Generic validation error (bad collection name, malformed update spec)
    ValidationError,

    // Generic/internal errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotConnected => write!(f, "Not connected"),
            ErrorKind::DuplicateId => write!(f, "Duplicate ID"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::FileCorrupted => write!(f, "File corrupted"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom JDB error type.
///
/// `JdbError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use jdb::errors::{JdbError, ErrorKind};
///
/// // Create a simple error
/// let err = JdbError::new("Duplicate ID", ErrorKind::DuplicateId);
///
/// // Create an error with a cause
/// let cause = JdbError::new("IO failed", ErrorKind::IOError);
/// let err = JdbError::new_with_cause("Flush failed", ErrorKind::IOError, cause);
/// ```
#[derive(Clone)]
pub struct JdbError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<JdbError>>,
    backtrace: Atomic<Backtrace>,
}

impl JdbError {
    /// Creates a new `JdbError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JdbError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `JdbError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JdbError) -> Self {
        JdbError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&JdbError> {
        self.cause.as_deref()
    }
}

impl Display for JdbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JdbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for JdbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for JDB operations.
///
/// `JdbResult<T>` is shorthand for `Result<T, JdbError>`.
/// All fallible JDB operations return this type.
pub type JdbResult<T> = Result<T, JdbError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for JdbError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        JdbError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for JdbError {
    fn from(err: serde_json::Error) -> Self {
        JdbError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<String> for JdbError {
    fn from(msg: String) -> Self {
        JdbError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for JdbError {
    fn from(msg: &str) -> Self {
        JdbError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jdb_error_new_creates_error() {
        let error = JdbError::new("An error occurred", ErrorKind::IOError);
        assert_eq!(error.message(), "An error occurred");
        assert_eq!(error.kind(), &ErrorKind::IOError);
        assert!(error.cause().is_none());
    }

    #[test]
    fn jdb_error_new_with_cause_creates_error() {
        let cause = JdbError::new("IO failed", ErrorKind::IOError);
        let error = JdbError::new_with_cause("Flush failed", ErrorKind::IOError, cause);
        assert_eq!(error.message(), "Flush failed");
        assert!(error.cause().is_some());
        assert_eq!(error.cause().unwrap().message(), "IO failed");
    }

    #[test]
    fn jdb_error_display_shows_message() {
        let error = JdbError::new("Duplicate ID", ErrorKind::DuplicateId);
        assert_eq!(format!("{}", error), "Duplicate ID");
    }

    #[test]
    fn jdb_error_source_chains() {
        let cause = JdbError::new("root cause", ErrorKind::IOError);
        let error = JdbError::new_with_cause("outer", ErrorKind::FileCorrupted, cause);
        let source = error.source().expect("source should be present");
        assert_eq!(format!("{}", source), "root cause");
    }

    #[test]
    fn io_error_not_found_maps_to_file_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: JdbError = io_err.into();
        assert_eq!(error.kind(), &ErrorKind::FileNotFound);
    }

    #[test]
    fn io_error_permission_denied_maps_to_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let error: JdbError = io_err.into();
        assert_eq!(error.kind(), &ErrorKind::PermissionDenied);
    }

    #[test]
    fn io_error_other_maps_to_io_error() {
        let io_err = std::io::Error::other("boom");
        let error: JdbError = io_err.into();
        assert_eq!(error.kind(), &ErrorKind::IOError);
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::NotConnected), "Not connected");
        assert_eq!(format!("{}", ErrorKind::DuplicateId), "Duplicate ID");
        assert_eq!(format!("{}", ErrorKind::FileCorrupted), "File corrupted");
    }

    #[test]
    fn string_converts_to_internal_error() {
        let error: JdbError = "something broke".into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
        assert_eq!(error.message(), "something broke");
    }
}
