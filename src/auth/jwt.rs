//! JWT token service
//!
//! Issues and validates the HS256 bearer tokens carried by staff clients.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::models::User;

const DEV_FALLBACK_SECRET: &str = "qrdine-development-secret-change-in-production";

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (should be at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Read from `JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`,
    /// `JWT_AUDIENCE`. Missing secret falls back to a development-only
    /// value with a loud warning.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development fallback");
            DEV_FALLBACK_SECRET.to_string()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7 * 24 * 60),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "qrdine-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "qrdine-clients".to_string()),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    pub username: String,
    /// Role name ("super_admin" | "counter")
    pub role: String,
    /// Restaurant scope for counter accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

pub struct JwtService {
    config: JwtConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding,
            decoding,
        }
    }

    /// Issue a token for a staff user.
    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            restaurant_id: user.restaurant_id.as_ref().map(|id| id.to_string()),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Pull the token out of an `Authorization: Bearer <token>` header.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;

    fn test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "unit-test-secret-unit-test-secret".to_string(),
            expiration_minutes: 60,
            issuer: "qrdine-server".to_string(),
            audience: "qrdine-clients".to_string(),
        })
    }

    fn test_user() -> User {
        User {
            id: Some(surrealdb::RecordId::from_table_key("user", "u1")),
            username: "counter1".to_string(),
            password_hash: String::new(),
            role: Role::Counter,
            restaurant_id: Some(surrealdb::RecordId::from_table_key("restaurant", "r1")),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn round_trip() {
        let svc = test_service();
        let token = svc.generate_token(&test_user()).unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.username, "counter1");
        assert_eq!(claims.role, "counter");
        assert_eq!(claims.restaurant_id.as_deref(), Some("restaurant:r1"));
    }

    #[test]
    fn expired_token_rejected() {
        let mut config = test_service().config.clone();
        config.expiration_minutes = -5;
        let svc = JwtService::new(config);
        let token = svc.generate_token(&test_user()).unwrap();
        assert!(matches!(
            test_service().validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn tampered_token_rejected() {
        let svc = test_service();
        let mut token = svc.generate_token(&test_user()).unwrap();
        token.push('x');
        assert!(matches!(
            svc.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
