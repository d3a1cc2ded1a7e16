//! Integration tests for the JWT authentication middleware.
//!
//! The middleware must attach an identity for a valid token and fall
//! through to "unauthenticated" in every other case, without ever
//! aborting the request pipeline.

use actix_web::{test, web, App};
use std::sync::Arc;

use se_api::app;
use se_api::middleware::auth::JwtAuth;
use se_api::routes::AppState;
use se_core::domain::entities::user::{User, UserRole};
use se_core::domain::value_objects::{Email, RawPassword};
use se_core::repositories::{MockUserRepository, UserCommandRepository, UserQueryRepository};
use se_core::services::auth::{LoginService, RegisterUserService};
use se_core::services::password::{BcryptPasswordEncoder, PasswordEncoder};
use se_core::services::token::{TokenService, TokenServiceConfig};

type TestState = AppState<MockUserRepository, MockUserRepository, BcryptPasswordEncoder>;

struct TestContext {
    repository: Arc<MockUserRepository>,
    encoder: Arc<BcryptPasswordEncoder>,
    token_service: Arc<TokenService>,
    state: web::Data<TestState>,
}

fn test_context() -> TestContext {
    let repository = Arc::new(MockUserRepository::new());
    let encoder = Arc::new(BcryptPasswordEncoder::new(4));
    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig {
            secret: "middleware-test-secret-long-enough!!!!".to_string(),
            issuer: "shop-easy".to_string(),
            access_token_expiry_secs: 900,
            refresh_token_expiry_secs: 604800,
        })
        .unwrap(),
    );

    let register_service = Arc::new(RegisterUserService::new(
        Arc::clone(&repository),
        Arc::clone(&encoder),
    ));
    let login_service = Arc::new(LoginService::new(
        Arc::clone(&repository),
        Arc::clone(&encoder),
        Arc::clone(&token_service),
    ));

    TestContext {
        repository,
        encoder,
        token_service,
        state: web::Data::new(AppState::new(register_service, login_service)),
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(JwtAuth::new(
                    Arc::clone(&$ctx.token_service),
                    Arc::clone(&$ctx.repository) as Arc<dyn UserQueryRepository>,
                ))
                .app_data($ctx.state.clone())
                .configure(
                    app::configure::<MockUserRepository, MockUserRepository, BcryptPasswordEncoder>,
                ),
        )
        .await
    };
}

/// Registers a user directly through the ports and returns the aggregate
async fn seed_user(ctx: &TestContext, email: &str) -> User {
    let encoded = ctx
        .encoder
        .encode(&RawPassword::new("Test1234!").unwrap())
        .unwrap();
    let user = User::register(Email::new(email).unwrap(), encoded, UserRole::Buyer);
    ctx.repository.register_user(&user).await.unwrap();
    user
}

#[actix_rt::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_valid_token_attaches_identity() {
    let ctx = test_context();
    let user = seed_user(&ctx, "middleware@example.com").await;
    let token = ctx.token_service.create_access_token(&user).unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["email"], "middleware@example.com");
    assert_eq!(body["user_id"], user.id().to_string());
    assert_eq!(body["roles"], serde_json::json!(["BUYER"]));
}

#[actix_rt::test]
async fn test_garbage_token_proceeds_unauthenticated() {
    let ctx = test_context();
    let app = init_app!(ctx);

    // The middleware must not abort the pipeline; the extractor rejects
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_garbage_token_does_not_abort_public_routes() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_lowercase_bearer_prefix_is_ignored() {
    let ctx = test_context();
    let user = seed_user(&ctx, "case@example.com").await;
    let token = ctx.token_service.create_access_token(&user).unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_valid_token_for_unknown_identity_stays_unauthenticated() {
    let ctx = test_context();

    // A correctly signed token whose subject was never persisted
    let encoded = ctx
        .encoder
        .encode(&RawPassword::new("Test1234!").unwrap())
        .unwrap();
    let ghost = User::register(
        Email::new("ghost@example.com").unwrap(),
        encoded,
        UserRole::Buyer,
    );
    let token = ctx.token_service.create_access_token(&ghost).unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let ctx = test_context();
    let user = seed_user(&ctx, "forged@example.com").await;

    let other_service = TokenService::new(TokenServiceConfig {
        secret: "a-different-secret-also-long-enough!!!".to_string(),
        issuer: "shop-easy".to_string(),
        access_token_expiry_secs: 900,
        refresh_token_expiry_secs: 604800,
    })
    .unwrap();
    let forged = other_service.create_access_token(&user).unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
