//! Route registration shared by the binary and the integration tests.

use actix_web::{web, HttpResponse};

use se_core::repositories::{UserCommandRepository, UserQueryRepository};
use se_core::services::password::PasswordEncoder;

use crate::routes;

/// Registers all application routes
///
/// The generic parameters pin the concrete port implementations carried by
/// `AppState`; `main` wires the MySQL adapters, tests wire mocks.
pub fn configure<C, Q, P>(cfg: &mut web::ServiceConfig)
where
    C: UserCommandRepository + 'static,
    Q: UserQueryRepository + 'static,
    P: PasswordEncoder + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(routes::auth::register::register::<C, Q, P>))
                    .route("/login", web::post().to(routes::auth::login::login::<C, Q, P>)),
            )
            .service(web::scope("/users").route("/me", web::get().to(routes::users::me::me))),
    );
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "shop-easy-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
