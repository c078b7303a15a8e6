use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenClaims;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and
/// session-token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `token_ttl_days` - Token lifetime in days
    pub fn new(secret: &[u8], token_ttl_days: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret, token_ttl_days),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token bound to the user's current
    /// profile version.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &str,
        version: i64,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(user_id, version)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used at registration, where the credentials were just created.
    ///
    /// # Errors
    /// * `TokenError` - Token signing failed
    pub fn issue_token(&self, user_id: &str, version: i64) -> Result<String, TokenError> {
        self.token_codec.issue(user_id, version)
    }

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token validation or decoding failed
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.token_codec.verify(token)
    }
}
