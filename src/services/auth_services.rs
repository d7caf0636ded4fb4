// src/services/auth_services.rs - session token verification
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::models::user::SessionClaims;

/// Name of the httpOnly cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no session token")]
    MissingToken,
    #[error("invalid auth header format")]
    MalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("parse uuid error")]
    UuidError(#[from] uuid::Error),
}

#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Check signature and expiry, then return the user id in `sub`.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(Uuid::parse_str(&data.claims.sub)?)
    }

    /// Pull the bearer token out of an `Authorization` header value.
    pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MalformedHeader)?
            .trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(token)
    }
}
