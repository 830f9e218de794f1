use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session claims - data stored in the token
///
/// Tokens are issued by the hosted auth service; this server only
/// verifies them. `sub` carries the user id as a string.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,   // Subject (user_id as string)
    pub user_id: Uuid, // User UUID
    pub exp: i64,      // Expiration timestamp
    pub iat: i64,      // Issued at timestamp
    pub iss: String,   // Issuer
    pub jti: String,   // JWT ID (unique token identifier)
}

/// Session service - verifies session tokens (and mints them for tests/tooling)
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl SessionService {
    /// Create new session service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a new session token for a user
    ///
    /// Token expires after 24 hours. Production tokens come from the
    /// hosted auth service; this is for tests and local tooling.
    pub fn create_token(&self, user_id: Uuid) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(24);

        let claims = SessionClaims {
            sub: user_id.to_string(),
            user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a session token
    ///
    /// Returns claims if token is valid, issued by us, and not expired
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let service = SessionService::new("test_secret_key", "test_issuer".to_string());
        let user_id = Uuid::new_v4();

        let token = service.create_token(user_id).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_invalid_token() {
        let service = SessionService::new("test_secret_key", "test_issuer".to_string());
        let result = service.verify_token("invalid_token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = SessionService::new("secret1", "test_issuer".to_string());
        let service2 = SessionService::new("secret2", "test_issuer".to_string());

        let token = service1.create_token(Uuid::new_v4()).unwrap();

        // Token created with secret1 should not verify with secret2
        let result = service2.verify_token(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let minting = SessionService::new("shared_secret", "other_app".to_string());
        let verifying = SessionService::new("shared_secret", "test_issuer".to_string());

        let token = minting.create_token(Uuid::new_v4()).unwrap();

        // Same key, wrong issuer: must be rejected
        let result = verifying.verify_token(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_expiry_window() {
        let service = SessionService::new("test_secret_key", "test_issuer".to_string());

        let token = service.create_token(Uuid::new_v4()).unwrap();
        let claims = service.verify_token(&token).unwrap();

        // Token should expire in ~24 hours
        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;
        assert!(expires_in > 23 * 3600);
        assert!(expires_in <= 24 * 3600);
    }
}
