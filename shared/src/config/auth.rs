//! JWT authentication configuration

use serde::{Deserialize, Serialize};

/// Minimum signing secret length in bytes required by HMAC-SHA256
pub const MIN_SECRET_BYTES: usize = 32;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds (must exceed the access expiry)
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("shop-easy"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(604800);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "shop-easy".to_string());

        Self {
            secret,
            access_token_expiry,
            refresh_token_expiry,
            issuer,
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }

    /// Validate the configuration invariants
    ///
    /// The secret must be at least 32 bytes and the refresh token must
    /// outlive the access token.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(format!(
                "JWT secret must be at least {} bytes (got {})",
                MIN_SECRET_BYTES,
                self.secret.len()
            ));
        }
        if self.access_token_expiry <= 0 {
            return Err("Access token expiry must be positive".to_string());
        }
        if self.refresh_token_expiry <= 0 {
            return Err("Refresh token expiry must be positive".to_string());
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err("Refresh token expiry must exceed access token expiry".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.issuer, "shop-easy");
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("a-secret-key-with-at-least-32-bytes!")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = JwtConfig::new("too-short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_must_exceed_access() {
        let mut config = JwtConfig::default();
        config.refresh_token_expiry = config.access_token_expiry;
        assert!(config.validate().is_err());

        config.refresh_token_expiry = config.access_token_expiry - 1;
        assert!(config.validate().is_err());
    }
}
