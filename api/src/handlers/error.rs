//! Conversion of domain errors into HTTP responses.
//!
//! Domain validation and credential errors map to 4xx responses with
//! stable error codes; persistence and invariant failures stay opaque
//! server-side faults.

use actix_web::{http::header, HttpRequest, HttpResponse};

use se_core::errors::{AuthError, DomainError, ValidationError};
use se_shared::types::ErrorResponse;

/// Language preference for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    /// Detect language preference from the Accept-Language header
    pub fn from_request(req: &HttpRequest) -> Self {
        let header_value = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        // The first supported language tag wins; quality factors beyond
        // ordering are not honored
        for tag in header_value.split(',') {
            let language = tag.trim().split(';').next().unwrap_or("").to_lowercase();
            if language.starts_with("zh") {
                return Language::Chinese;
            }
            if language.starts_with("en") {
                return Language::English;
            }
        }

        Language::English
    }
}

fn localized(lang: Language, en: &str, zh: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Chinese => zh.to_string(),
    }
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: DomainError, lang: Language) -> HttpResponse {
    match error {
        DomainError::Validation(ValidationError::InvalidEmail { reason }) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_email",
                localized(lang, &reason, "无效的邮箱格式"),
            ))
        }
        DomainError::Validation(ValidationError::InvalidPassword { reasons }) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_password",
                localized(lang, &reasons, "密码不符合安全要求"),
            ))
        }
        DomainError::Auth(AuthError::InvalidCredentials) => {
            HttpResponse::Unauthorized().json(ErrorResponse::new(
                "invalid_credentials",
                localized(lang, "Email or password is incorrect", "邮箱或密码不正确"),
            ))
        }
        DomainError::Auth(AuthError::AccountDisabled) => {
            HttpResponse::Forbidden().json(ErrorResponse::new(
                "account_disabled",
                localized(lang, "Account is disabled", "账户已被禁用"),
            ))
        }
        DomainError::User(user_error) => {
            tracing::warn!("User invariant violation: {}", user_error);
            HttpResponse::Conflict().json(ErrorResponse::new(
                "invariant_violation",
                localized(lang, &user_error.to_string(), "用户角色状态不允许此操作"),
            ))
        }
        DomainError::Token(token_error) => {
            tracing::debug!("Token error surfaced to handler: {}", token_error);
            HttpResponse::Unauthorized().json(ErrorResponse::new(
                "invalid_token",
                localized(lang, "Token is invalid or expired", "令牌无效或已过期"),
            ))
        }
        DomainError::Persistence { message } => {
            // The cause stays in the logs; clients get a generic fault
            tracing::error!("Persistence error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "persistence_error",
                localized(lang, "A storage error occurred", "存储服务发生错误"),
            ))
        }
        DomainError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                localized(lang, "An internal error occurred", "发生内部错误"),
            ))
        }
    }
}
