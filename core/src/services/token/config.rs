//! Configuration for the token service

use crate::errors::{DomainError, DomainResult};

/// Minimum signing secret length in bytes required by HMAC-SHA256
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret (HMAC, at least 32 bytes)
    pub secret: String,
    /// Issuer claim embedded in every token
    pub issuer: String,
    /// Access token expiry in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token expiry in seconds (must exceed the access expiry)
    pub refresh_token_expiry_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            issuer: "shop-easy".to_string(),
            access_token_expiry_secs: 900,
            refresh_token_expiry_secs: 604800,
        }
    }
}

impl TokenServiceConfig {
    /// Validate the configuration invariants
    ///
    /// Enforced once at startup, not per token: the secret must be long
    /// enough for the HMAC key, both lifetimes must be positive, and the
    /// refresh lifetime must exceed the access lifetime.
    pub fn validate(&self) -> DomainResult<()> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Internal {
                message: format!(
                    "JWT secret must be at least {} bytes (got {})",
                    MIN_SECRET_BYTES,
                    self.secret.len()
                ),
            });
        }
        if self.access_token_expiry_secs <= 0 {
            return Err(DomainError::Internal {
                message: "Access token expiry must be positive".to_string(),
            });
        }
        if self.refresh_token_expiry_secs <= self.access_token_expiry_secs {
            return Err(DomainError::Internal {
                message: "Refresh token expiry must exceed access token expiry".to_string(),
            });
        }
        Ok(())
    }
}
