//! User repository traits defining the persistence boundary.
//!
//! The write side and the read side are separate ports: use cases depend
//! only on the operations they actually perform. Implementations live in
//! the infrastructure layer and must keep the abstraction boundary between
//! domain and storage intact.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::domain::value_objects::{Email, UserId};
use crate::errors::DomainError;

/// Write-side port for user persistence
#[async_trait]
pub trait UserCommandRepository: Send + Sync {
    /// Persist a newly registered user
    ///
    /// Email uniqueness is enforced here, not by the caller: a concurrent
    /// registration with the same email must fail at this boundary. Any
    /// storage failure surfaces as `DomainError::Persistence` wrapping the
    /// cause; callers do not inspect or retry.
    ///
    /// # Returns
    /// * `Ok(())` - User persisted
    /// * `Err(DomainError)` - Storage failure, including uniqueness violations
    async fn register_user(&self, user: &User) -> Result<(), DomainError>;
}

/// Read-side port for user persistence
#[async_trait]
pub trait UserQueryRepository: Send + Sync {
    /// Find a user by their normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Check whether a user exists with the given email
    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
}
