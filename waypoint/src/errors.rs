use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for Waypoint operations
///
/// Each kind names one category of failure so that call sites can decide
/// whether a failure is recovered locally (a tier fallback), surfaced to the
/// user, or treated as a programming error.
///
/// # Examples
///
/// ```rust
/// use waypoint::errors::{ErrorKind, WaypointError, WaypointResult};
///
/// fn example() -> WaypointResult<()> {
///     Err(WaypointError::new("Primary store is down", ErrorKind::PrimaryUnavailable))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::PrimaryUnavailable);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Tiering Errors
    /// The primary store raised during an operation (connectivity, validation, timeout).
    /// Always recovered by falling back to the secondary store.
    PrimaryUnavailable,
    /// Neither the primary nor the secondary store satisfied the operation
    BothTiersExhausted,

    // Invocation Errors
    /// A filter or update descriptor uses a shape the store does not support
    MalformedInvocation,

    // Lookup Errors
    /// The requested resource was not found
    NotFound,
    /// A logically unique entry (for example a user email) already exists
    DuplicateEntry,

    // Data Mapping Errors
    /// Error mapping a typed record to/from a document
    ObjectMappingError,
    /// Invalid data type for operation
    InvalidDataType,

    // Application Errors
    /// Credentials could not be validated
    InvalidCredentials,
    /// Roadmap generation or parsing of the generated roadmap failed
    GenerationError,
    /// Invalid configuration supplied to the builder
    ConfigError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::PrimaryUnavailable => write!(f, "Primary store unavailable"),
            ErrorKind::BothTiersExhausted => write!(f, "Both tiers exhausted"),
            ErrorKind::MalformedInvocation => write!(f, "Malformed invocation"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::DuplicateEntry => write!(f, "Duplicate entry"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidCredentials => write!(f, "Invalid credentials"),
            ErrorKind::GenerationError => write!(f, "Generation error"),
            ErrorKind::ConfigError => write!(f, "Configuration error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Waypoint error type.
///
/// `WaypointError` carries a message, an [ErrorKind] and an optional cause, and
/// captures a backtrace at construction for debugging.
///
/// # Examples
///
/// ```rust
/// use waypoint::errors::{ErrorKind, WaypointError};
///
/// let cause = WaypointError::new("connection refused", ErrorKind::PrimaryUnavailable);
/// let err = WaypointError::new_with_cause("Roadmap not found", ErrorKind::BothTiersExhausted, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct WaypointError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<WaypointError>>,
    backtrace: Arc<Backtrace>,
}

impl WaypointError {
    /// Creates a new `WaypointError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        WaypointError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `WaypointError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: WaypointError) -> Self {
        WaypointError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&WaypointError> {
        self.cause.as_deref()
    }
}

impl Display for WaypointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for WaypointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for WaypointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Waypoint operations.
pub type WaypointResult<T> = Result<T, WaypointError>;

impl From<serde_json::Error> for WaypointError {
    fn from(err: serde_json::Error) -> Self {
        WaypointError::new(
            &format!("JSON mapping error: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<String> for WaypointError {
    fn from(msg: String) -> Self {
        WaypointError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for WaypointError {
    fn from(msg: &str) -> Self {
        WaypointError::new(msg, ErrorKind::InternalError)
    }
}
