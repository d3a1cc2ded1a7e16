//! JWT authentication middleware.
//!
//! Runs once per inbound request, before any protected handler. A valid
//! bearer token attaches the authenticated identity to the request
//! extensions; a missing, malformed, or invalid token lets the request
//! proceed unauthenticated. Authorization decisions belong to the handlers
//! (through the `AuthContext` extractor), not to this layer, so the
//! middleware never rejects a request and never propagates an error.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use se_core::domain::entities::user::User;
use se_core::domain::value_objects::{Email, UserId};
use se_core::errors::DomainResult;
use se_core::repositories::UserQueryRepository;
use se_core::services::token::TokenService;

/// Authenticated identity attached to the request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Identity of the authenticated user
    pub user_id: UserId,
    /// Normalized email of the authenticated user
    pub email: String,
    /// Role names held by the user at lookup time
    pub roles: Vec<String>,
}

impl AuthContext {
    /// Build a context from a loaded user aggregate
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id(),
            email: user.email().value().to_string(),
            roles: user.roles().iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
    users: Arc<dyn UserQueryRepository>,
}

impl JwtAuth {
    /// Create the middleware with its collaborators
    pub fn new(token_service: Arc<TokenService>, users: Arc<dyn UserQueryRepository>) -> Self {
        Self {
            token_service,
            users,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            users: Arc::clone(&self.users),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    users: Arc<dyn UserQueryRepository>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);
        let users = Arc::clone(&self.users);

        Box::pin(async move {
            if let Some(token) = extract_bearer_token(&req) {
                if token_service.validate_token(&token) {
                    match load_identity(&token, &token_service, users.as_ref()).await {
                        Ok(Some(context)) => {
                            tracing::debug!(email = %context.email, "Request authenticated");
                            req.extensions_mut().insert(context);
                        }
                        Ok(None) => {
                            tracing::debug!("Valid token for unknown identity");
                        }
                        Err(e) => {
                            // Failure here only fails to establish identity;
                            // it must never abort request processing
                            tracing::warn!("Authentication processing failed: {}", e);
                        }
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Extracts a bearer token from the Authorization header
///
/// The `Bearer ` prefix match is case-sensitive.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Loads the identity referenced by a validated token's email claim
async fn load_identity(
    token: &str,
    token_service: &TokenService,
    users: &dyn UserQueryRepository,
) -> DomainResult<Option<AuthContext>> {
    let email = Email::new(&token_service.email_from_token(token)?)?;
    let user = users.find_by_email(&email).await?;
    Ok(user.map(|u| AuthContext::from_user(&u)))
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
