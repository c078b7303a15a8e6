use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Codec for opaque session tokens.
///
/// Encodes `(user id, profile version)` into an HS256-signed JWT and
/// verifies authenticity on the way back. The signature makes forgery
/// infeasible: a client cannot mint a token for an arbitrary version.
/// Tokens are stateless; nothing is persisted per token.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_days: i64,
}

impl TokenCodec {
    /// Create a codec with a signing secret and a token lifetime in days.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl_days,
        }
    }

    /// Issue a token binding `user_id` to `version`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, user_id: &str, version: i64) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = TokenClaims::for_session(user_id, version, self.ttl_days);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Checks the signature and the `exp` claim. The version comparison
    /// against the user's stored version is the caller's job; the codec
    /// only vouches that the claims are authentic.
    ///
    /// # Errors
    /// * `Expired` - Token lifetime has elapsed
    /// * `Invalid` - Signature mismatch or malformed token
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(SECRET, 90);

        let token = codec.issue("user123", 7).expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.ver, 7);
    }

    #[test]
    fn test_verify_garbage() {
        let codec = TokenCodec::new(SECRET, 90);

        let result = codec.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_tampered_token() {
        let codec = TokenCodec::new(SECRET, 90);
        let token = codec.issue("user123", 0).expect("Failed to issue token");

        // Flip a character in the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_truncated_token() {
        let codec = TokenCodec::new(SECRET, 90);
        let token = codec.issue("user123", 0).expect("Failed to issue token");

        assert!(codec.verify(&token[..token.len() - 2]).is_err());
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!", 90);
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!", 90);

        let token = codec1.issue("user123", 0).expect("Failed to issue token");

        assert!(codec2.verify(&token).is_err());
    }

    #[test]
    fn test_verify_expired_token() {
        // Negative TTL puts exp firmly behind the validation leeway
        let codec = TokenCodec::new(SECRET, -1);
        let token = codec.issue("user123", 0).expect("Failed to issue token");

        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }
}
