//! Authentication routes: registration and login.

pub mod login;
pub mod register;

use std::sync::Arc;

use se_core::repositories::{UserCommandRepository, UserQueryRepository};
use se_core::services::auth::{LoginService, RegisterUserService};
use se_core::services::password::PasswordEncoder;

/// Shared application state injected into the handlers
pub struct AppState<C, Q, P>
where
    C: UserCommandRepository,
    Q: UserQueryRepository,
    P: PasswordEncoder,
{
    pub register_service: Arc<RegisterUserService<C, P>>,
    pub login_service: Arc<LoginService<Q, P>>,
}

impl<C, Q, P> AppState<C, Q, P>
where
    C: UserCommandRepository,
    Q: UserQueryRepository,
    P: PasswordEncoder,
{
    pub fn new(
        register_service: Arc<RegisterUserService<C, P>>,
        login_service: Arc<LoginService<Q, P>>,
    ) -> Self {
        Self {
            register_service,
            login_service,
        }
    }
}
