//! Domain-level error types.
//!
//! These errors are transport agnostic. The only transport hint they carry is
//! an optional status override which the HTTP adapter honours when present;
//! every other mapping decision lives in the inbound error translator.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
///
/// The set is closed: new failure categories are added here rather than
/// invented at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request payload is malformed or fails validation.
    InvalidPayload,
    /// The caller is not allowed to perform the action.
    UserNotAuthorized,
    /// A business rule rejected the request.
    BusinessRuleViolation,
    /// The request would create a duplicate of an existing entry.
    DuplicateEntry,
    /// The target is not in a state that permits the action.
    InvalidState,
    /// The requested resource does not exist.
    ResourceNotFound,
}

impl ErrorCode {
    /// Symbolic name used as the default error label.
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::InvalidPayload.as_str(), "INVALID_PAYLOAD");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::UserNotAuthorized => "USER_NOT_AUTHORIZED",
            Self::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
            Self::InvalidState => "INVALID_STATE",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `status`, when present, lies in `100..=599`.
/// - `error_type`, when present, is non-empty once trimmed.
///
/// # Examples
/// ```
/// use boilerplate::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::ResourceNotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::ResourceNotFound);
/// assert_eq!(err.label(), "RESOURCE_NOT_FOUND");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    status: Option<u16>,
    error_type: Option<String>,
    trace_id: Option<String>,
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty after trimming.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was empty after trimming.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
    /// The error-type label was empty after trimming.
    #[error("error type label must not be empty")]
    EmptyErrorType,
    /// The status override is outside the HTTP status range.
    #[error("status override {status} is outside 100..=599")]
    InvalidStatus {
        /// Rejected status value.
        status: u16,
    },
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    ///
    /// # Panics
    /// Panics when `message` is blank. Use [`Error::try_new`] for untrusted
    /// input.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            status: None,
            error_type: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Transport status override, if one was attached.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Error-type label override, if one was attached.
    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    /// Label reported to clients: the error-type override, else the code name.
    pub fn label(&self) -> &str {
        self.error_type().unwrap_or_else(|| self.code.as_str())
    }

    /// Trace identifier captured when the error was built.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a status override after checking it is a valid HTTP status.
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::Error;
    ///
    /// let err = Error::invalid_state("locked").try_with_status(409).expect("valid status");
    /// assert_eq!(err.status(), Some(409));
    /// assert!(Error::invalid_state("locked").try_with_status(42).is_err());
    /// ```
    pub fn try_with_status(mut self, status: u16) -> Result<Self, ErrorValidationError> {
        if !(100..=599).contains(&status) {
            return Err(ErrorValidationError::InvalidStatus { status });
        }
        self.status = Some(status);
        Ok(self)
    }

    /// Attach an error-type label that replaces the code name in responses.
    pub fn try_with_error_type(
        mut self,
        error_type: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let error_type = error_type.into();
        if error_type.trim().is_empty() {
            return Err(ErrorValidationError::EmptyErrorType);
        }
        self.error_type = Some(error_type);
        Ok(self)
    }

    /// Attach a trace identifier, replacing any captured one.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Fallible variant of [`Error::with_trace_id`] rejecting blank values.
    pub fn try_with_trace_id(mut self, id: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(id);
        Ok(self)
    }

    /// Convenience constructor for [`ErrorCode::InvalidPayload`].
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPayload, message)
    }

    /// Convenience constructor for [`ErrorCode::UserNotAuthorized`].
    pub fn user_not_authorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UserNotAuthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::BusinessRuleViolation`].
    pub fn business_rule_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BusinessRuleViolation, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEntry`].
    pub fn duplicate_entry(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEntry, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidState`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Convenience constructor for [`ErrorCode::ResourceNotFound`].
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
