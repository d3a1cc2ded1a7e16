//! Error type definitions for authentication, tokens, and validation
//!
//! Localized presentation of these errors happens in the API layer;
//! the messages here are the canonical English forms.

use thiserror::Error;

/// Authentication-related errors
///
/// The credentials message is deliberately identical for an unknown email
/// and a wrong password so that login responses cannot be used to probe
/// which accounts exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,
}

/// Token-related errors
///
/// These never cross the `validate_token` boundary as errors; they exist
/// for claim extraction and diagnostic logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors raised at value-object construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {reason}")]
    InvalidEmail { reason: String },

    #[error("Invalid password: {reasons}")]
    InvalidPassword { reasons: String },
}

/// Structural invariant violations on the user aggregate
///
/// Always a programming or usage error, never part of a normal flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("A user must retain at least one role")]
    RoleRequired,

    #[error("Role is not assigned: {role}")]
    RoleNotAssigned { role: String },
}
