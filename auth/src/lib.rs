//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the user service:
//! - Password hashing (Argon2id)
//! - Version-stamped session tokens (signed JWT)
//! - Authentication coordination
//!
//! A token binds a user identity to the profile version current at issue
//! time. The service invalidates every outstanding token for a user by
//! bumping the stored version; no server-side token store is needed.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", 90);
//! let token = codec.issue("user123", 0).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.ver, 0);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 90);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify credentials and issue a token bound to the current
//! // profile version
//! let token = auth.authenticate("password123", &hash, "user123", 0).unwrap();
//!
//! // Validate token on a subsequent request
//! let claims = auth.verify_token(&token).unwrap();
//! assert_eq!(claims.ver, 0);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClaims;
pub use token::TokenCodec;
pub use token::TokenError;
