//! Password value objects.
//!
//! - `RawPassword`: the plaintext form, validated against the password
//!   policy at construction and never persisted.
//! - `EncodedPassword`: the opaque hashed form, the only one stored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

/// Minimum raw password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum raw password length
pub const MAX_PASSWORD_LENGTH: usize = 100;

static UPPERCASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]").expect("uppercase regex must compile"));
static LOWERCASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]").expect("lowercase regex must compile"));
static DIGIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]").expect("digit regex must compile"));
static SPECIAL_CHAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).expect("symbol regex must compile")
});

/// A plaintext password that satisfies the password policy
///
/// All policy violations are collected and reported together rather than
/// failing on the first one.
#[derive(Clone, PartialEq, Eq)]
pub struct RawPassword(String);

impl RawPassword {
    /// Validate a plaintext password against the policy
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        if value.len() < MIN_PASSWORD_LENGTH {
            violations.push(format!(
                "Password must be at least {} characters long.",
                MIN_PASSWORD_LENGTH
            ));
        }

        if value.len() > MAX_PASSWORD_LENGTH {
            violations.push(format!(
                "Password must be at most {} characters long.",
                MAX_PASSWORD_LENGTH
            ));
        }

        if !UPPERCASE_REGEX.is_match(value) {
            violations.push("Password must contain at least one uppercase letter.".to_string());
        }

        if !LOWERCASE_REGEX.is_match(value) {
            violations.push("Password must contain at least one lowercase letter.".to_string());
        }

        if !DIGIT_REGEX.is_match(value) {
            violations.push("Password must contain at least one digit.".to_string());
        }

        if !SPECIAL_CHAR_REGEX.is_match(value) {
            violations.push("Password must contain at least one special character.".to_string());
        }

        if !violations.is_empty() {
            return Err(ValidationError::InvalidPassword {
                reasons: violations.join(" "),
            });
        }

        Ok(Self(value.to_string()))
    }

    /// The plaintext value, for hashing and verification only
    pub fn value(&self) -> &str {
        &self.0
    }
}

// The plaintext must never leak through Debug output or logs.
impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(<redacted>)")
    }
}

/// An opaque password hash
///
/// No format validation is applied; the hashing algorithm owns the format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPassword(String);

impl EncodedPassword {
    /// Wrap an already-hashed password
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The stored hash string
    pub fn value(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(RawPassword::new("Test1234!").is_ok());
    }

    #[test]
    fn test_each_rule_is_independent() {
        // Each case satisfies four of the five checks and misses one
        let cases = [
            ("Ab1!xyz", "too short"),
            ("abcd1234!", "no uppercase"),
            ("ABCD1234!", "no lowercase"),
            ("Abcdefgh!", "no digit"),
            ("Abcd1234", "no special character"),
        ];

        for (input, label) in cases {
            assert!(RawPassword::new(input).is_err(), "accepted: {}", label);
        }

        let too_long = format!("Ab1!{}", "x".repeat(100));
        assert!(RawPassword::new(&too_long).is_err(), "accepted: too long");
    }

    #[test]
    fn test_violations_are_aggregated() {
        // "abc" misses length, uppercase, digit, and symbol at once
        let error = RawPassword::new("abc").unwrap_err();
        let message = error.to_string();

        assert!(message.contains("at least 8 characters"));
        assert!(message.contains("uppercase"));
        assert!(message.contains("digit"));
        assert!(message.contains("special character"));
        // "abc" does contain lowercase, so that rule must not be reported
        assert!(!message.contains("lowercase"));
    }

    #[test]
    fn test_boundary_lengths() {
        // Exactly 8 and exactly 100 characters pass
        assert!(RawPassword::new("Abcd12!h").is_ok());

        let mut long = String::from("Abcd12!");
        long.push_str(&"x".repeat(93));
        assert_eq!(long.len(), 100);
        assert!(RawPassword::new(&long).is_ok());

        long.push('x');
        assert!(RawPassword::new(&long).is_err());
    }

    #[test]
    fn test_all_policy_symbols_accepted() {
        for symbol in r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#.chars() {
            let candidate = format!("Abcd1234{}", symbol);
            assert!(
                RawPassword::new(&candidate).is_ok(),
                "rejected symbol: {}",
                symbol
            );
        }
    }

    #[test]
    fn test_debug_does_not_leak_value() {
        let password = RawPassword::new("Test1234!").unwrap();
        let debug = format!("{:?}", password);
        assert!(!debug.contains("Test1234!"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_encoded_password_is_opaque() {
        // Any string is accepted; validation belongs to the hash algorithm
        let encoded = EncodedPassword::new("$2b$12$abcdefghijklmnopqrstuv");
        assert_eq!(encoded.value(), "$2b$12$abcdefghijklmnopqrstuv");
    }
}
