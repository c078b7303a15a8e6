use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email: invalid")]
    Invalid,
}

/// A payload field that violated a validation rule.
///
/// Rendered as `"<field>: <reason>"`, which is the exact message the API
/// returns with a 422.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Validation errors (automatically converted via #[from])
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("User already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Deliberately opaque: a missing header, malformed token, unknown
    // user, and stale version must be indistinguishable to the caller.
    #[error("Authentication error")]
    AuthenticationFailed,

    #[error("User can update only his own profile")]
    Forbidden,

    #[error("Provided payload can not be parsed")]
    InvalidPayload,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
