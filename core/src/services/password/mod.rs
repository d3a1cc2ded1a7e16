//! Password hashing module
//!
//! Defines the `PasswordEncoder` port consumed by the registration and
//! login use cases, together with the bcrypt-backed implementation.

mod bcrypt;

pub use self::bcrypt::BcryptPasswordEncoder;

use crate::domain::value_objects::{EncodedPassword, RawPassword};
use crate::errors::DomainError;

/// One-way password hashing port
///
/// Hashing and comparison are CPU-bound, synchronous, and blocking; callers
/// must not invoke them from a context that cannot tolerate blocking.
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password into its stored form
    ///
    /// Fails with an internal error if the hashing primitive yields no
    /// output.
    fn encode(&self, raw: &RawPassword) -> Result<EncodedPassword, DomainError>;

    /// Check a raw password against a stored hash
    ///
    /// Never fails: a mismatch, or a hash the primitive cannot parse,
    /// both return `false`.
    fn matches(&self, raw: &RawPassword, encoded: &EncodedPassword) -> bool;
}
