//! Token entities for JWT-based authentication.
//!
//! Tokens are self-contained and stateless: validity is purely signature
//! plus expiry, with no server-side revocation list.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Kind of token, embedded as a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Email of the subject
    pub email: String,

    /// Full role set of the subject at issue time
    pub roles: Vec<String>,

    /// Whether this is an access or a refresh token
    pub token_type: TokenType,

    /// Issued at timestamp (UNIX seconds)
    pub iat: i64,

    /// Expiration timestamp (UNIX seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user
    ///
    /// Access and refresh claims differ only by `token_type` and the
    /// expiry duration supplied by the caller.
    pub fn for_user(user: &User, issuer: &str, expiry_secs: i64, token_type: TokenType) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_secs);

        Self {
            sub: user.id().to_string(),
            iss: issuer.to_string(),
            email: user.email().value().to_string(),
            roles: user.roles().iter().map(|r| r.to_string()).collect(),
            token_type,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired (strict, no leeway)
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the subject claim
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client after authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
