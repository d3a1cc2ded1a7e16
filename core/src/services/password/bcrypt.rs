//! Bcrypt implementation of the password encoder port.

use crate::domain::value_objects::{EncodedPassword, RawPassword};
use crate::errors::DomainError;

use super::PasswordEncoder;

/// Password encoder backed by bcrypt
///
/// Bcrypt salts every hash internally, so encoding the same password twice
/// produces different outputs while `matches` still verifies both.
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    /// Create an encoder with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw: &RawPassword) -> Result<EncodedPassword, DomainError> {
        bcrypt::hash(raw.value(), self.cost)
            .map(EncodedPassword::new)
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    fn matches(&self, raw: &RawPassword, encoded: &EncodedPassword) -> bool {
        bcrypt::verify(raw.value(), encoded.value()).unwrap_or(false)
    }
}
