//! Bearer token issuing and verification
//!
//! Tokens are HS256 JWTs whose subject is the user id. They carry no other
//! user data, so profile changes take effect without reissuing tokens.

use std::fmt::Debug;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// Value of the `iss` claim on every issued token
pub const TOKEN_ISSUER: &str = "recipe-app-api";

const RANDOM_SECRET_LENGTH: usize = 64;
const MAX_LIFETIME_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    pub fn for_user(user: &User, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id().to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::parse(&self.sub)
    }
}

/// Signing secret and token lifetime
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u64,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Configuration with a random secret, tokens do not survive a restart
    pub fn with_random_secret(expiration_hours: u64) -> Self {
        let secret: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SECRET_LENGTH)
            .map(char::from)
            .collect();

        Self::new(secret, expiration_hours)
    }

    fn lifetime(&self) -> Duration {
        Duration::hours(self.expiration_hours.min(MAX_LIFETIME_HOURS) as i64)
    }
}

/// Issues and verifies bearer tokens
pub trait JwtGenerator: Send + Sync + Debug {
    fn generate(&self, user: &User) -> Result<String, DomainError>;

    /// Check signature, issuer and expiry
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
            validation,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::for_user(user, self.config.lifetime());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::validation(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserFlags;

    const SECRET: &str = "test-secret";

    fn test_user() -> User {
        User::new("test@example.com", "Test", "hash", UserFlags::regular())
    }

    fn sign(claims: &JwtClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_and_validate() {
        let service = JwtService::new(JwtConfig::new(SECRET, 24));
        let user = test_user();

        let token = service.generate(&user).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), *user.id());
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtService::new(JwtConfig::new("secret-a", 24));
        let verifier = JwtService::new(JwtConfig::new("secret-b", 24));

        let token = issuer.generate(&test_user()).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new(JwtConfig::new(SECRET, 24));
        let claims = JwtClaims::for_user(&test_user(), Duration::hours(-1));

        assert!(service.validate(&sign(&claims)).is_err());
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let service = JwtService::new(JwtConfig::new(SECRET, 24));
        let mut claims = JwtClaims::for_user(&test_user(), Duration::hours(1));
        claims.iss = "someone-else".to_string();

        assert!(service.validate(&sign(&claims)).is_err());
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new(JwtConfig::new(SECRET, 24));
        assert!(service.validate("not-a-token").is_err());
    }

    #[test]
    fn test_random_secret() {
        let a = JwtConfig::with_random_secret(1);
        let b = JwtConfig::with_random_secret(1);

        assert_eq!(a.secret.len(), RANDOM_SECRET_LENGTH);
        assert_ne!(a.secret, b.secret);
        assert!(!format!("{:?}", a).contains(&a.secret));
    }
}
