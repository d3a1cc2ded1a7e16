use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use se_api::{app, middleware, routes::AppState};
use se_core::repositories::UserQueryRepository;
use se_core::services::auth::{LoginService, RegisterUserService};
use se_core::services::password::BcryptPasswordEncoder;
use se_core::services::token::{TokenService, TokenServiceConfig};
use se_infra::database::{create_pool, MySqlUserRepository};
use se_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting ShopEasy API Server");

    let config = AppConfig::from_env();
    if config.jwt.is_using_default_secret() {
        tracing::warn!("Using the default JWT secret; set JWT_SECRET in production");
    }

    // Token lifetimes and secret length are validated here, once, at startup
    let token_config = TokenServiceConfig {
        secret: config.jwt.secret.clone(),
        issuer: config.jwt.issuer.clone(),
        access_token_expiry_secs: config.jwt.access_token_expiry,
        refresh_token_expiry_secs: config.jwt.refresh_token_expiry,
    };
    let token_service = Arc::new(
        TokenService::new(token_config).expect("invalid JWT configuration"),
    );

    let pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");
    let repository = Arc::new(MySqlUserRepository::new(pool));
    let password_encoder = Arc::new(BcryptPasswordEncoder::default());

    let register_service = Arc::new(RegisterUserService::new(
        Arc::clone(&repository),
        Arc::clone(&password_encoder),
    ));
    let login_service = Arc::new(LoginService::new(
        Arc::clone(&repository),
        Arc::clone(&password_encoder),
        Arc::clone(&token_service),
    ));

    let state = web::Data::new(AppState::new(register_service, login_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        let query_repository: Arc<dyn UserQueryRepository> =
            Arc::clone(&repository) as Arc<dyn UserQueryRepository>;

        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::cors::create_cors())
            .wrap(middleware::auth::JwtAuth::new(
                Arc::clone(&token_service),
                query_repository,
            ))
            .app_data(state.clone())
            .configure(
                app::configure::<MySqlUserRepository, MySqlUserRepository, BcryptPasswordEncoder>,
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
