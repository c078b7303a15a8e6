use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for the authentication/user domain service.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first session token.
    ///
    /// # Errors
    /// * `Validation` - A payload field violated a rule
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a token bound to the user's current
    /// profile version.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or password mismatch,
    ///   deliberately indistinguishable
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError>;

    /// Resolve a session token to its user.
    ///
    /// The gate every protected endpoint passes through first: the token
    /// must verify and its embedded version must equal the user's current
    /// stored version.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Malformed token, unknown user, or stale
    ///   version
    /// * `DatabaseError` - Storage operation failed
    async fn authenticate(&self, token: &str) -> Result<User, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update a user's own profile, bumping their version and thereby
    /// invalidating every outstanding token.
    ///
    /// # Errors
    /// * `Forbidden` - Actor is not the target user
    /// * `InvalidPayload` - Payload missing or unparseable
    /// * `Validation` - A supplied field is empty
    /// * `NotFound` - Target user does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn update_profile(
        &self,
        actor: &UserId,
        target: &UserId,
        payload: Option<UpdateProfileCommand>,
    ) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    ///   (case-insensitive comparison)
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address (case-insensitive).
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Apply profile changes and increment `version` in one atomic step.
    ///
    /// Concurrent updates to the same user serialize; each observes and
    /// produces a distinct version.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        changes: UpdateProfileCommand,
    ) -> Result<User, UserError>;
}
