use axum::{Json, extract::State};
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{AuthenticatedUser, LoginRequest, LoginResponse};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login and receive a JWT access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Current user, straight from the verified token
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Authenticated user", body = AuthenticatedUser),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(auth_user: AuthUser) -> Result<Json<AuthenticatedUser>, AppError> {
    Ok(Json(AuthenticatedUser {
        id: auth_user.user_id()?,
        email: auth_user.0.email.clone(),
        full_name: None,
        company_id: auth_user.0.company_id,
        role: auth_user.0.role.clone(),
    }))
}
