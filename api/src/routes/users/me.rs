use actix_web::HttpResponse;
use serde::Serialize;

use crate::middleware::auth::AuthContext;

/// Identity payload echoed back to an authenticated caller
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Handler for GET /api/v1/users/me
///
/// Returns the identity established by the authentication middleware.
/// Requests without an established identity are rejected by the
/// `AuthContext` extractor with 401.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse {
        user_id: auth.user_id.to_string(),
        email: auth.email,
        roles: auth.roles,
    })
}
