use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::validation;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication and user operations.
///
/// Token validity is a pure function of the stored profile version: a
/// token carries the version it was issued against, and `authenticate`
/// accepts it only while the stored version still matches. There is no
/// revocation list; bumping the version on profile mutation is the one
/// and only invalidation mechanism.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    authenticator: Authenticator,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new service with injected dependencies.
    pub fn new(repository: Arc<R>, authenticator: Authenticator) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError> {
        validation::validate_registration(&command)?;

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            email: EmailAddress::new(command.email)?,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            version: 0,
            created_at: Utc::now(),
        };

        let user = self.repository.create(user).await?;

        let token = self
            .authenticator
            .issue_token(&user.id.to_string(), user.version)
            .map_err(|e| UserError::Unknown(format!("Token issuance failed: {}", e)))?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(AuthSession { user, token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        // A fresh token is bound to the current version; login itself
        // never bumps it, so earlier tokens stay valid alongside.
        let token = self
            .authenticator
            .authenticate(password, &user.password_hash, &user.id.to_string(), user.version)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    UserError::Unknown(format!("Password verification failed: {}", err))
                }
                AuthenticationError::TokenError(err) => {
                    UserError::Unknown(format!("Token issuance failed: {}", err))
                }
            })?;

        Ok(AuthSession { user, token })
    }

    async fn authenticate(&self, token: &str) -> Result<User, UserError> {
        let claims = self.authenticator.verify_token(token).map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            UserError::AuthenticationFailed
        })?;

        let user_id =
            UserId::from_string(&claims.sub).map_err(|_| UserError::AuthenticationFailed)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::AuthenticationFailed)?;

        if claims.ver != user.version {
            tracing::info!(
                user_id = %user.id,
                token_ver = claims.ver,
                stored_ver = user.version,
                "Provided token with old user version"
            );
            return Err(UserError::AuthenticationFailed);
        }

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_profile(
        &self,
        actor: &UserId,
        target: &UserId,
        payload: Option<UpdateProfileCommand>,
    ) -> Result<User, UserError> {
        // Ownership is checked before the payload is even looked at, so a
        // caller aiming at a foreign id gets 403 whatever they sent.
        if actor != target {
            return Err(UserError::Forbidden);
        }

        let command = payload.ok_or(UserError::InvalidPayload)?;
        validation::validate_profile_update(&command)?;

        let user = self.repository.update_profile(target, command).await?;

        tracing::info!(user_id = %user.id, version = user.version, "Profile updated");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-token-signing-32-bytes!";

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update_profile(&self, id: &UserId, changes: UpdateProfileCommand) -> Result<User, UserError>;
        }
    }

    fn service(repository: MockTestUserRepository) -> AuthService<MockTestUserRepository> {
        AuthService::new(Arc::new(repository), Authenticator::new(SECRET, 90))
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand {
            last_name: "Doe".to_string(),
            first_name: "John".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "Str0ng!pass".to_string(),
        }
    }

    fn stored_user() -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("john.doe@example.com".to_string()).unwrap(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password_hash: Authenticator::new(SECRET, 90)
                .hash_password("Str0ng!pass")
                .unwrap(),
            version: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "john.doe@example.com"
                    && user.version == 0
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);

        let session = service.register(register_command()).await.unwrap();
        assert_eq!(session.user.first_name, "John");
        assert_eq!(session.user.version, 0);

        // The issued token resolves back to the new user at version 0
        let claims = Authenticator::new(SECRET, 90)
            .verify_token(&session.token)
            .unwrap();
        assert_eq!(claims.sub, session.user.id.to_string());
        assert_eq!(claims.ver, 0);
    }

    #[tokio::test]
    async fn test_register_invalid_payload_skips_repository() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(0);

        let service = service(repository);

        let mut command = register_command();
        command.password = "Abc123".to_string();

        let err = service.register(command).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "password: should contain special characters"
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let service = service(repository);

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_binds_current_version() {
        let mut user = stored_user();
        user.version = 4;
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email == "john.doe@example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(repository);

        let session = service
            .login("john.doe@example.com", "Str0ng!pass")
            .await
            .unwrap();

        let claims = Authenticator::new(SECRET, 90)
            .verify_token(&session.token)
            .unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.ver, 4);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository);

        let result = service.login("john.doe@example.com", "wrongPass").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_indistinguishable() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.login("nobody@example.com", "Str0ng!pass").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = stored_user();
        let user_id = user.id;

        let token = Authenticator::new(SECRET, 90)
            .issue_token(&user_id.to_string(), 0)
            .unwrap();

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(2)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(repository);

        // Re-presenting the same valid token keeps resolving to the same
        // identity until the next mutation
        for _ in 0..2 {
            let authenticated = service.authenticate(&token).await.unwrap();
            assert_eq!(authenticated.id, user_id);
        }
    }

    #[tokio::test]
    async fn test_authenticate_stale_version() {
        let mut user = stored_user();
        let token = Authenticator::new(SECRET, 90)
            .issue_token(&user.id.to_string(), 0)
            .unwrap();

        // Profile mutated since issuance
        user.version = 1;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository);

        let result = service.authenticate(&token).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::AuthenticationFailed
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let token = Authenticator::new(SECRET, 90)
            .issue_token(&UserId::new().to_string(), 0)
            .unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.authenticate(&token).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::AuthenticationFailed
        ));
    }

    #[tokio::test]
    async fn test_authenticate_garbage_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = service(repository);

        let result = service.authenticate("not.a.token").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::AuthenticationFailed
        ));
    }

    #[tokio::test]
    async fn test_update_profile_requires_ownership() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_update_profile().times(0);

        let service = service(repository);

        let result = service
            .update_profile(
                &UserId::new(),
                &UserId::new(),
                Some(UpdateProfileCommand::default()),
            )
            .await;
        assert!(matches!(result.unwrap_err(), UserError::Forbidden));
    }

    #[tokio::test]
    async fn test_update_profile_missing_payload_after_ownership() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_update_profile().times(0);

        let service = service(repository);
        let id = UserId::new();

        let result = service.update_profile(&id, &id, None).await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidPayload));
    }

    #[tokio::test]
    async fn test_update_profile_bumps_version() {
        let user = stored_user();
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_update_profile()
            .withf(move |id, changes| {
                *id == user_id
                    && changes.first_name.as_deref() == Some("Jane")
                    && changes.last_name.is_none()
            })
            .times(1)
            .returning(move |_, changes| {
                let mut updated = user.clone();
                if let Some(first_name) = changes.first_name {
                    updated.first_name = first_name;
                }
                if let Some(last_name) = changes.last_name {
                    updated.last_name = last_name;
                }
                updated.version += 1;
                Ok(updated)
            });

        let service = service(repository);

        let command = UpdateProfileCommand {
            first_name: Some("Jane".to_string()),
            last_name: None,
        };
        let updated = service
            .update_profile(&user_id, &user_id, Some(command))
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.version, 1);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_empty_field() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_update_profile().times(0);

        let service = service(repository);
        let id = UserId::new();

        let command = UpdateProfileCommand {
            first_name: Some(String::new()),
            last_name: None,
        };
        let err = service
            .update_profile(&id, &id, Some(command))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "firstName: may not be empty");
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![stored_user(), stored_user()]));

        let service = service(repository);

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
