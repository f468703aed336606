//! JWT Token Service
//!
//! Issues and validates signed, time-limited bearer tokens. Tokens are
//! stateless: validity is determined solely by signature and expiry, not by
//! a revocation list.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

const ISSUER: &str = "customer-server";

/// Fixed token lifetime; a new token must be reissued after expiry.
const TOKEN_LIFETIME_DAYS: i64 = 15;

/// JWT claims: subject is the customer's email.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (email)
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
    /// Granted scopes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

/// JWT service for token operations. The signing secret is injected at
/// construction and shared for the process lifetime; no rotation.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self::with_lifetime(secret, Duration::days(TOKEN_LIFETIME_DAYS))
    }

    /// Same service with a custom lifetime; used by tests to exercise
    /// expiry without waiting.
    pub fn with_lifetime(secret: &str, lifetime: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);
        // Validity is strictly now < exp; no clock-skew allowance.
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            lifetime,
        }
    }

    /// Issue a token for a subject with no scopes.
    pub fn issue_token(&self, subject: &str) -> Result<String> {
        self.issue_token_with_scopes(subject, &[])
    }

    /// Issue a token carrying the given scope claims.
    pub fn issue_token_with_scopes(&self, subject: &str, scopes: &[&str]) -> Result<String> {
        let now = Utc::now();
        let expiration = now + self.lifetime;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: ISSUER.to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode JWT token")
    }

    /// Validate signature, issuer, and expiry, and decode the claims.
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate JWT token")
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        let token_data = self.validate_token(token)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_preserves_claims() {
        let jwt_service = JwtService::new("test_secret");

        let token = jwt_service
            .issue_token_with_scopes("a@b.com", &["ROLE_USER"])
            .unwrap();
        let claims = jwt_service.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.scopes, vec!["ROLE_USER".to_string()]);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn fresh_token_validates() {
        let jwt_service = JwtService::new("test_secret");

        let token = jwt_service.issue_token("a@b.com").unwrap();

        assert!(jwt_service.validate_token(&token).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt_service = JwtService::with_lifetime("test_secret", Duration::seconds(-1));

        let token = jwt_service.issue_token("a@b.com").unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }

    #[test]
    fn token_just_past_expiry_is_rejected() {
        let jwt_service = JwtService::with_lifetime("test_secret", Duration::seconds(-30));

        let token = jwt_service.issue_token("a@b.com").unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = JwtService::new("secret_a");
        let verifier = JwtService::new("secret_b");

        let token = issuer.issue_token("a@b.com").unwrap();

        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let jwt_service = JwtService::new("test_secret");

        assert!(jwt_service.validate_token("not.a.jwt").is_err());
    }
}
