use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session token.
///
/// The pair `(sub, ver)` is the whole point of the token: `sub` identifies
/// the user and `ver` snapshots the user's profile version at issue time.
/// A token stops being accepted the moment the stored version moves past
/// `ver`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Profile version the token was issued against
    pub ver: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Build claims for a user session expiring `ttl_days` from now.
    pub fn for_session(user_id: impl ToString, version: i64, ttl_days: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::days(ttl_days);

        Self {
            sub: user_id.to_string(),
            ver: version,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_session() {
        let claims = TokenClaims::for_session("user123", 3, 90);

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.ver, 3);
        assert_eq!(claims.exp - claims.iat, 90 * 24 * 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_jti_unique_per_token() {
        let a = TokenClaims::for_session("user123", 0, 1);
        let b = TokenClaims::for_session("user123", 0, 1);
        assert_ne!(a.jti, b.jti);
    }
}
