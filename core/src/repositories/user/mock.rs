//! In-memory implementation of the user repository ports for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::domain::value_objects::{Email, UserId};
use crate::errors::DomainError;

use super::trait_::{UserCommandRepository, UserQueryRepository};

/// Mock user repository backed by a hash map
///
/// Enforces the same email-uniqueness constraint the real storage does, so
/// duplicate registration fails at this boundary in tests as well.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository pre-seeded with a user
    pub async fn with_existing_user(user: User) -> Self {
        let repo = Self::new();
        repo.users.write().await.insert(user.id(), user);
        repo
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserCommandRepository for MockUserRepository {
    async fn register_user(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::Persistence {
                message: format!("Duplicate entry for email: {}", user.email()),
            });
        }

        users.insert(user.id(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl UserQueryRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email() == email))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::UserRole;
    use crate::domain::value_objects::EncodedPassword;

    fn test_user(email: &str) -> User {
        User::register(
            Email::new(email).unwrap(),
            EncodedPassword::new("$2b$04$hash"),
            UserRole::Buyer,
        )
    }

    #[tokio::test]
    async fn test_register_and_find() {
        let repo = MockUserRepository::new();
        let user = test_user("mock@example.com");

        repo.register_user(&user).await.unwrap();

        let email = Email::new("mock@example.com").unwrap();
        let found = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found, user);

        assert!(repo.exists_by_email(&email).await.unwrap());
        assert!(repo.find_by_id(user.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MockUserRepository::new();
        repo.register_user(&test_user("dup@example.com")).await.unwrap();

        let result = repo.register_user(&test_user("dup@example.com")).await;

        assert!(matches!(result, Err(DomainError::Persistence { .. })));
    }

    #[tokio::test]
    async fn test_missing_user() {
        let repo = MockUserRepository::new();
        let email = Email::new("nobody@example.com").unwrap();

        assert!(repo.find_by_email(&email).await.unwrap().is_none());
        assert!(!repo.exists_by_email(&email).await.unwrap());
    }
}
