//! Email address value object.
//!
//! Construction is the single validation gate: an `Email` that exists is
//! always normalized (trimmed, lower-cased) and format-valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// A normalized, format-validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and normalize an email address
    ///
    /// The input is trimmed and lower-cased before validation; two inputs
    /// differing only in case or surrounding whitespace yield equal values.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::InvalidEmail {
                reason: "Email must not be blank".to_string(),
            });
        }

        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(ValidationError::InvalidEmail {
                reason: format!("Email format is not valid: {}", normalized),
            });
        }

        Ok(Self(normalized))
    }

    /// The canonical string form
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::new("buyer@example.com").unwrap();
        assert_eq!(email.value(), "buyer@example.com");
    }

    #[test]
    fn test_email_is_normalized() {
        let email = Email::new("  Buyer@Example.COM ").unwrap();
        assert_eq!(email.value(), "buyer@example.com");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = Email::new("  MIXED.Case+tag@Example.com").unwrap();
        let twice = Email::new(once.value()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_email_rejected() {
        assert!(Email::new("").is_err());
        assert!(Email::new("   ").is_err());
    }

    #[test]
    fn test_invalid_formats_rejected() {
        for input in [
            "plainaddress",
            "@no-local-part.com",
            "missing-domain@",
            "missing-tld@example",
            "two@@example.com",
            "spaces in@example.com",
        ] {
            assert!(Email::new(input).is_err(), "accepted invalid: {}", input);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let email = Email::new("seller@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"seller@example.com\"");

        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let result: Result<Email, _> = serde_json::from_str("\"not-an-email\"");
        assert!(result.is_err());
    }
}
