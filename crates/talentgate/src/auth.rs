//! Token validation shared by the REST layer and the websocket handshake.
//!
//! Connection parameters claimed at websocket connect time are only accepted
//! after the bearer token passes the same HS256 validation the rest of the
//! API uses, and only when the token subject matches the claimed user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token invalid or expired")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("token subject does not match claimed identity")]
    SubjectMismatch,
}

/// Validates access tokens against the configured signing key.
pub struct TokenValidator {
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Validate a token and require its subject to be `user_id`. This is the
    /// check that binds a websocket connection's claimed identity to a real
    /// session instead of trusting the query parameters as-is.
    pub fn validate_for_user(&self, token: &str, user_id: i64) -> Result<Claims, AuthError> {
        let claims = self.validate(token)?;
        if claims.sub != user_id.to_string() {
            return Err(AuthError::SubjectMismatch);
        }
        Ok(claims)
    }
}

/// Mint an access token for `sub`, valid for the configured TTL.
pub fn issue_token(
    config: &AuthConfig,
    sub: &str,
    role: Option<&str>,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        role: role.map(str::to_string),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(config.token_ttl_minutes)).timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )?;
    Ok(token)
}
