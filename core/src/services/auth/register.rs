//! User registration use case

use std::sync::Arc;

use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::{Email, RawPassword};
use crate::errors::DomainResult;
use crate::repositories::UserCommandRepository;
use crate::services::password::PasswordEncoder;

/// Command object for user registration
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Registration service
///
/// No duplicate-email pre-check happens here: uniqueness is enforced by
/// the persistence boundary, so a concurrent registration with the same
/// email fails there rather than racing an application-level check.
pub struct RegisterUserService<C, P>
where
    C: UserCommandRepository,
    P: PasswordEncoder,
{
    command_repository: Arc<C>,
    password_encoder: Arc<P>,
}

impl<C, P> RegisterUserService<C, P>
where
    C: UserCommandRepository,
    P: PasswordEncoder,
{
    /// Create a new registration service
    pub fn new(command_repository: Arc<C>, password_encoder: Arc<P>) -> Self {
        Self {
            command_repository,
            password_encoder,
        }
    }

    /// Register a new user
    ///
    /// Validates the email and password independently, hashes the password,
    /// builds the aggregate, and persists it. Returns the in-memory
    /// aggregate, not a re-fetched copy.
    pub async fn execute(&self, command: RegisterUserCommand) -> DomainResult<User> {
        tracing::info!(email = %command.email, "Registration requested");

        let email = Email::new(&command.email)?;
        let raw_password = RawPassword::new(&command.password)?;

        let encoded_password = self.password_encoder.encode(&raw_password)?;

        let user = User::register(email, encoded_password, command.role);

        self.command_repository.register_user(&user).await?;

        tracing::info!(user_id = %user.id(), "Registration completed");

        Ok(user)
    }
}
