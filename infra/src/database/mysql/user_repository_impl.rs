//! MySQL implementation of the user persistence ports.
//!
//! Maps the `users` table to the `User` aggregate. The table carries a
//! unique index on `email`; a duplicate registration surfaces from here as
//! a persistence error, which is the only concurrency guard for
//! registration.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id         CHAR(36)     PRIMARY KEY,
//!     email      VARCHAR(255) NOT NULL UNIQUE,
//!     password   VARCHAR(255) NOT NULL,
//!     roles      VARCHAR(64)  NOT NULL,
//!     status     VARCHAR(16)  NOT NULL,
//!     created_at DATETIME(6)  NOT NULL,
//!     updated_at DATETIME(6)  NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::collections::BTreeSet;

use se_core::domain::entities::user::{User, UserRole, UserStatus};
use se_core::domain::value_objects::{Email, EncodedPassword, UserId};
use se_core::errors::DomainError;
use se_core::repositories::{UserCommandRepository, UserQueryRepository};

/// MySQL implementation of the user repository ports
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Serialize the role set into its column form
    fn roles_to_column(roles: &BTreeSet<UserRole>) -> String {
        roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the roles column back into a role set
    fn column_to_roles(column: &str) -> Result<BTreeSet<UserRole>, DomainError> {
        column
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|name| {
                name.parse::<UserRole>().map_err(|e| DomainError::Persistence {
                    message: format!("Corrupt roles column: {}", e),
                })
            })
            .collect()
    }

    /// Convert a database row to the User aggregate
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let map_err = |e: sqlx::Error| DomainError::Persistence {
            message: format!("Failed to read user row: {}", e),
        };

        let id: String = row.try_get("id").map_err(map_err)?;
        let email: String = row.try_get("email").map_err(map_err)?;
        let password: String = row.try_get("password").map_err(map_err)?;
        let roles: String = row.try_get("roles").map_err(map_err)?;
        let status: String = row.try_get("status").map_err(map_err)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(map_err)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(map_err)?;

        let id = UserId::parse_str(&id).map_err(|e| DomainError::Persistence {
            message: format!("Invalid UUID in id column: {}", e),
        })?;
        // Stored emails were normalized at registration; this re-checks the
        // format on the way out and fails loudly on corrupt data
        let email = Email::new(&email).map_err(|e| DomainError::Persistence {
            message: format!("Corrupt email column: {}", e),
        })?;
        let status = status
            .parse::<UserStatus>()
            .map_err(|e| DomainError::Persistence {
                message: format!("Corrupt status column: {}", e),
            })?;

        Ok(User::reconstitute(
            id,
            email,
            EncodedPassword::new(password),
            Self::column_to_roles(&roles)?,
            status,
            created_at,
            updated_at,
        ))
    }
}

#[async_trait]
impl UserCommandRepository for MySqlUserRepository {
    async fn register_user(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (id, email, password, roles, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id().to_string())
            .bind(user.email().value())
            .bind(user.password().value())
            .bind(Self::roles_to_column(user.roles()))
            .bind(user.status().as_str())
            .bind(user.created_at())
            .bind(user.updated_at())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to register user: {}", e),
            })?;

        Ok(())
    }
}

#[async_trait]
impl UserQueryRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password, roles, status, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) as user_exists
        "#;

        let row = sqlx::query(query)
            .bind(email.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let exists: i8 = row.try_get("user_exists").map_err(|e| DomainError::Persistence {
            message: format!("Failed to read existence result: {}", e),
        })?;

        Ok(exists == 1)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password, roles, status, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}
