//! Unit tests for the token service

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::entities::token::{Claims, TokenType};
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::{Email, EncodedPassword};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

const TEST_SECRET: &str = "unit-test-secret-that-is-long-enough!!";

fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        secret: TEST_SECRET.to_string(),
        issuer: "shop-easy".to_string(),
        access_token_expiry_secs: 900,
        refresh_token_expiry_secs: 604800,
    }
}

fn test_service() -> TokenService {
    TokenService::new(test_config()).expect("valid test config")
}

fn test_user() -> User {
    User::register(
        Email::new("test@example.com").unwrap(),
        EncodedPassword::new("$2b$04$hash"),
        UserRole::Buyer,
    )
}

/// Signs arbitrary claims with the test secret, bypassing the service
fn sign_raw(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_invalid_config_rejected() {
    let config = TokenServiceConfig {
        secret: "short".to_string(),
        ..test_config()
    };
    assert!(TokenService::new(config).is_err());

    let config = TokenServiceConfig {
        refresh_token_expiry_secs: 900,
        ..test_config()
    };
    assert!(TokenService::new(config).is_err());
}

#[test]
fn test_access_token_round_trip() {
    let service = test_service();
    let user = test_user();

    let token = service.create_access_token(&user).unwrap();

    assert!(service.validate_token(&token));
    assert_eq!(service.email_from_token(&token).unwrap(), "test@example.com");
    assert_eq!(service.user_id_from_token(&token).unwrap(), user.id());
    assert_eq!(
        service.roles_from_token(&token).unwrap(),
        vec!["BUYER".to_string()]
    );
    assert_eq!(
        service.token_type_from_token(&token).unwrap(),
        TokenType::Access
    );
}

#[test]
fn test_refresh_token_type() {
    let service = test_service();
    let user = test_user();

    let token = service.create_refresh_token(&user).unwrap();

    assert!(service.validate_token(&token));
    assert_eq!(
        service.token_type_from_token(&token).unwrap(),
        TokenType::Refresh
    );
    assert_eq!(service.user_id_from_token(&token).unwrap(), user.id());
}

#[test]
fn test_tokens_embed_full_role_set() {
    let service = test_service();
    let mut user = test_user();
    user.add_role(UserRole::Seller);

    let token = service.create_access_token(&user).unwrap();
    let roles = service.roles_from_token(&token).unwrap();

    assert_eq!(roles.len(), 2);
    assert!(roles.contains(&"BUYER".to_string()));
    assert!(roles.contains(&"SELLER".to_string()));
}

#[test]
fn test_expired_token_fails_validation() {
    let service = test_service();
    let user = test_user();

    let mut claims = Claims::for_user(&user, "shop-easy", 900, TokenType::Access);
    claims.iat = Utc::now().timestamp() - 1000;
    claims.exp = Utc::now().timestamp() - 100;

    let token = sign_raw(&claims);

    assert!(!service.validate_token(&token));
    assert!(matches!(
        service.email_from_token(&token),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_malformed_token_fails_validation() {
    let service = test_service();

    assert!(!service.validate_token("not-a-jwt"));
    assert!(!service.validate_token(""));
    assert!(!service.validate_token("aaa.bbb.ccc"));
}

#[test]
fn test_wrong_signature_fails_validation() {
    let service = test_service();
    let user = test_user();

    let other_config = TokenServiceConfig {
        secret: "a-completely-different-secret-key-here!!".to_string(),
        ..test_config()
    };
    let other_service = TokenService::new(other_config).unwrap();
    let token = other_service.create_access_token(&user).unwrap();

    assert!(!service.validate_token(&token));
}

#[test]
fn test_wrong_issuer_fails_validation() {
    let service = test_service();
    let user = test_user();

    let mut claims = Claims::for_user(&user, "shop-easy", 900, TokenType::Access);
    claims.iss = "someone-else".to_string();
    let token = sign_raw(&claims);

    assert!(!service.validate_token(&token));
}

#[test]
fn test_extraction_is_defensive_on_invalid_token() {
    // Claim extraction re-verifies; a garbage token yields an error, not
    // claims from an untrusted payload
    let service = test_service();

    assert!(service.email_from_token("garbage").is_err());
    assert!(service.user_id_from_token("garbage").is_err());
    assert!(service.roles_from_token("garbage").is_err());
}

#[test]
fn test_access_token_expiration_exposed() {
    let service = test_service();
    assert_eq!(service.access_token_expiration(), 900);
}
