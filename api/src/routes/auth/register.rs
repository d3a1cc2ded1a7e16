use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{RegisterRequest, UserResponse};
use crate::handlers::error::{handle_domain_error_with_lang, Language};

use se_core::repositories::{UserCommandRepository, UserQueryRepository};
use se_core::services::auth::RegisterUserCommand;
use se_core::services::password::PasswordEncoder;
use se_shared::types::{ApiResponse, ErrorResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Registers a new user account with an initial role.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "buyer@example.com",
///     "password": "Test1234!",
///     "role": "BUYER"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The created user without any credential material.
///
/// ## Errors
/// - 400 Bad Request: Invalid email format or password policy violation
/// - 500 Internal Server Error: Persistence failure (including duplicate email)
pub async fn register<C, Q, P>(
    req: HttpRequest,
    state: web::Data<AppState<C, Q, P>>,
    request: web::Json<RegisterRequest>,
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

    let command = RegisterUserCommand {
        email: request.email.clone(),
        password: request.password.clone(),
        role: request.role,
    };

    match state.register_service.execute(command).await {
        Ok(user) => {
            HttpResponse::Created().json(ApiResponse::success(UserResponse::from_user(&user)))
        }
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
