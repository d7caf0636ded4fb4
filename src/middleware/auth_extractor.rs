// src/middleware/auth_extractor.rs - resolves the acting user from the session token
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::{debug, error};
use uuid::Uuid;

use crate::handlers::ApiError;
use crate::services::auth_services::{AuthError, AuthService, SESSION_COOKIE};

/// Authenticated user; rejects the request with 401 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// The session cookie wins; a bearer header is accepted for API clients.
fn session_token(req: &HttpRequest) -> Result<String, AuthError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_string());
        }
    }
    match req.headers().get("Authorization") {
        Some(header) => {
            let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
            AuthService::bearer_token(value).map(str::to_string)
        }
        None => Err(AuthError::MissingToken),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(auth) = req.app_data::<web::Data<AuthService>>() else {
            error!("AuthService missing from app data");
            return ready(Err(ApiError::Internal("Authentication unavailable".into()).into()));
        };

        let result = session_token(req).and_then(|token| auth.verify(&token));
        match result {
            Ok(user_id) => ready(Ok(AuthenticatedUser { user_id })),
            Err(e) => {
                debug!("auth rejected for {} {}: {}", req.method(), req.path(), e);
                let message = match e {
                    AuthError::MissingToken => "Not authorized, no token",
                    _ => "Not authorized",
                };
                ready(Err(ApiError::Unauthorized(message.into()).into()))
            }
        }
    }
}
