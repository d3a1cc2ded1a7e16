use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponseDto, LoginRequest};
use crate::handlers::error::{handle_domain_error_with_lang, Language};

use se_core::repositories::{UserCommandRepository, UserQueryRepository};
use se_core::services::auth::LoginCommand;
use se_core::services::password::PasswordEncoder;
use se_shared::types::ErrorResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates a user and issues an access/refresh token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "buyer@example.com",
///     "password": "Test1234!"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJhbGciOiJIUzI1NiIs...",
///     "refresh_token": "eyJhbGciOiJIUzI1NiIs...",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid request data
/// - 401 Unauthorized: Unknown email or wrong password (one shared message)
/// - 403 Forbidden: Account disabled
pub async fn login<C, Q, P>(
    req: HttpRequest,
    state: web::Data<AppState<C, Q, P>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    C: UserCommandRepository + 'static,
    Q: UserQueryRepository + 'static,
    P: PasswordEncoder + 'static,
{
    let lang = Language::from_request(&req);

    if let Err(errors) = request.validate() {
        let mut details = std::collections::HashMap::new();
        details.insert("validation_errors".to_string(), serde_json::json!(errors));

        return HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", "Invalid request data").with_details(details),
        );
    }

    let command = LoginCommand {
        email: request.email.clone(),
        password: request.password.clone(),
    };

    match state.login_service.execute(command).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "buyer@example.com".to_string(),
            password: "Test1234!".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "nope".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_password = LoginRequest {
            password: String::new(),
            ..valid
        };
        assert!(empty_password.validate().is_err());
    }
}
