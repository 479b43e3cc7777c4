//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope; the core only promises
//! a stable code, a human-readable message, and (for validation failures) a
//! per-field breakdown.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails field validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to act on this entity.
    Forbidden,
    /// The requested entity does not exist.
    NotFound,
    /// The mutation is blocked by dependent state.
    Conflict,
    /// A referenced entity was absent at write time.
    MissingReference,
    /// The persistence layer failed unexpectedly; the write was rolled back.
    StorageFailure,
}

/// Per-field validation messages, keyed by field name.
///
/// All violations found in one submission are reported together, so a
/// payload failing two fields carries two entries.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty.
/// - `field_errors` is only present when `code` is
///   [`ErrorCode::InvalidRequest`].
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("client 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<FieldErrors>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field_errors: None,
        }
    }

    /// Build a validation error from accumulated per-field messages.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Error, ErrorCode, FieldErrors};
    ///
    /// let mut fields = FieldErrors::new();
    /// fields.insert("phone".into(), vec!["must match ###-###-####".into()]);
    /// let err = Error::validation(fields);
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    /// assert!(err.field_errors().is_some());
    /// ```
    pub fn validation(field_errors: FieldErrors) -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            message: "validation failed".to_owned(),
            field_errors: Some(field_errors),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Per-field validation messages, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::MissingReference`].
    pub fn missing_reference(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingReference, message)
    }

    /// Convenience constructor for [`ErrorCode::StorageFailure`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailure, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
