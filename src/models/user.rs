use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// subject / user id
    pub sub: String,
    pub exp: usize,
    pub iat: Option<usize>,
}
