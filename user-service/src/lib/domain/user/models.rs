use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `version` is the invalidation pivot for the whole service: every
/// accepted profile mutation increments it exactly once, and a session
/// token is only honored while its embedded version equals this field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address value type.
///
/// An address must parse as RFC 5322 and its domain must contain a dot
/// followed by a non-empty label, so bare hostnames (`user@localhost`)
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Invalid` - Address does not satisfy the accepted shape
    pub fn new(email: String) -> Result<Self, EmailError> {
        if Self::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::Invalid)
        }
    }

    /// Check whether a string is an acceptable email address.
    pub fn is_valid(email: &str) -> bool {
        if email_address::EmailAddress::from_str(email).is_err() {
            return false;
        }
        match email.rsplit_once('@') {
            Some((_, domain)) => domain
                .rsplit_once('.')
                .is_some_and(|(host, label)| !host.is_empty() && !label.is_empty()),
            None => false,
        }
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for uniqueness comparison.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user.
///
/// Carries the raw payload fields; the service validates them before any
/// value object is built, so the first-failure ordering of the field
/// rules stays observable.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub password: String,
}

/// Command to update a user's own profile.
///
/// Only provided fields are changed; each provided field must be
/// non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A freshly authenticated user together with the session token issued
/// against their current profile version.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
