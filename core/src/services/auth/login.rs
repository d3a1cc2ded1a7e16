//! Login use case

use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::{AuthResponse, Email, RawPassword};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserQueryRepository;
use crate::services::password::PasswordEncoder;
use crate::services::token::TokenService;

/// Command object for login
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Login service
pub struct LoginService<Q, P>
where
    Q: UserQueryRepository,
    P: PasswordEncoder,
{
    query_repository: Arc<Q>,
    password_encoder: Arc<P>,
    token_service: Arc<TokenService>,
}

impl<Q, P> LoginService<Q, P>
where
    Q: UserQueryRepository,
    P: PasswordEncoder,
{
    /// Create a new login service
    pub fn new(
        query_repository: Arc<Q>,
        password_encoder: Arc<P>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            query_repository,
            password_encoder,
            token_service,
        }
    }

    /// Authenticate a user and issue a token pair
    ///
    /// An unknown email and a wrong password produce the identical
    /// `InvalidCredentials` error, so responses cannot be used to probe
    /// which accounts exist. Only a disabled account gets a distinct
    /// message: once the password matched, the account's existence is no
    /// longer a secret.
    pub async fn execute(&self, command: LoginCommand) -> DomainResult<AuthResponse> {
        let email = Email::new(&command.email)?;

        let user = self
            .query_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::new(&command.password)?;
        if !self.password_encoder.matches(&raw_password, user.password()) {
            tracing::debug!(user_id = %user.id(), "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active() {
            tracing::info!(user_id = %user.id(), "Login rejected: account disabled");
            return Err(AuthError::AccountDisabled.into());
        }

        let access_token = self.token_service.create_access_token(&user)?;
        let refresh_token = self.token_service.create_refresh_token(&user)?;

        tracing::info!(user_id = %user.id(), "Login succeeded");

        Ok(AuthResponse::from_token_pair(
            TokenPair::new(access_token, refresh_token),
            self.token_service.access_token_expiration(),
        ))
    }
}
