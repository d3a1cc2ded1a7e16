//! Authentication use cases
//!
//! This module provides the application services that tie the domain
//! together:
//! - User registration (validate, hash, persist)
//! - Login (credential check, status check, token issuance)

mod login;
mod register;

#[cfg(test)]
mod tests;

pub use login::{LoginCommand, LoginService};
pub use register::{RegisterUserCommand, RegisterUserService};
